//! crates/archive_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the portal's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of where articles live and which feed APIs are called.

use crate::domain::{Coordinates, QuakeRecord, WeatherSnapshot};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for fallible port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to parse {0}: {1}")]
    Parse(String, String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Result of a best-effort feed fetch. Feeds never fail past their boundary;
/// every failure collapses into `Unavailable`.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome<T> {
    Available(T),
    Unavailable,
}

impl<T> FeedOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            FeedOutcome::Available(value) => Some(value),
            FeedOutcome::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for FeedOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FeedOutcome::Unavailable, FeedOutcome::Available)
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Lists the source names of every published article.
    async fn fetch_manifest(&self) -> PortResult<Vec<String>>;

    /// Fetches the raw text of one article source.
    async fn fetch_source(&self, name: &str) -> PortResult<String>;
}

#[async_trait]
pub trait QuakeFeed: Send + Sync {
    /// Fetches the fixed-size list of most recent seismic events.
    async fn fetch_recent(&self) -> FeedOutcome<Vec<QuakeRecord>>;
}

#[async_trait]
pub trait WeatherFeed: Send + Sync {
    /// Fetches current conditions at the given coordinates.
    async fn fetch_current(&self, coordinates: Coordinates) -> FeedOutcome<WeatherSnapshot>;
}
