pub mod articles;
pub mod quake;
pub mod weather;

pub use articles::{FsArticleSource, HttpArticleSource};
pub use quake::P2pQuakeAdapter;
pub use weather::OpenMeteoAdapter;
