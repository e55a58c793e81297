pub mod app;
pub mod cache;
pub mod domain;
pub mod format;
pub mod location;
pub mod ports;
pub mod repository;
pub mod view;

pub use app::{Action, Effects, FeedEvent, NewsApp, RefreshRequest};
pub use cache::{CacheSlot, CachedWeather, FeedCache, Freshness};
pub use domain::{Article, Category, Coordinates, QuakeRecord, ViewState, WeatherSnapshot};
pub use location::{LocationPermission, WeatherLocation};
pub use ports::{ArticleSource, FeedOutcome, PortError, PortResult, QuakeFeed, WeatherFeed};
pub use repository::ArticleRepository;
pub use view::{Page, WidgetUpdate};
