//! crates/archive_core/src/cache.rs
//!
//! In-memory cache for the two external feeds.
//! Each slot holds the latest successful fetch and is only ever overwritten.

use crate::domain::{QuakeRecord, WeatherSnapshot};
use crate::location::WeatherLocation;
use chrono::{DateTime, Utc};

/// How current a slot's value is. Staleness is unbounded: a cached value is
/// served for as long as the session lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Empty,
    Cached { since: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheSlot<T> {
    entry: Option<(T, DateTime<Utc>)>,
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T> CacheSlot<T> {
    pub fn get(&self) -> Option<&T> {
        self.entry.as_ref().map(|(value, _)| value)
    }

    /// Replaces the cached value wholesale.
    pub fn store(&mut self, value: T, at: DateTime<Utc>) {
        self.entry = Some((value, at));
    }

    pub fn freshness(&self) -> Freshness {
        match &self.entry {
            Some((_, since)) => Freshness::Cached { since: *since },
            None => Freshness::Empty,
        }
    }
}

/// Weather is cached together with the location it was requested for,
/// so the label survives re-renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedWeather {
    pub snapshot: WeatherSnapshot,
    pub location: WeatherLocation,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedCache {
    pub quakes: CacheSlot<Vec<QuakeRecord>>,
    pub weather: CacheSlot<CachedWeather>,
}
