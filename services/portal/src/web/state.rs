//! services/portal/src/web/state.rs
//!
//! Defines the state shared by every connection.

use archive_core::ports::{ArticleSource, QuakeFeed, WeatherFeed};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// Per-connection state lives in `Session`.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleSource>,
    pub quake_feed: Arc<dyn QuakeFeed>,
    pub weather_feed: Arc<dyn WeatherFeed>,
}
