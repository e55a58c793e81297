//! services/portal/src/adapters/quake.rs
//!
//! Adapter for the P2PQuake history API.
//! It implements the `QuakeFeed` port from the `core` crate.

use archive_core::domain::QuakeRecord;
use archive_core::ports::{FeedOutcome, PortError, PortResult, QuakeFeed};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Fetches the most recent JMA earthquake reports (code 551).
#[derive(Clone)]
pub struct P2pQuakeAdapter {
    client: Client,
    url: String,
}

impl P2pQuakeAdapter {
    /// `url` already carries the event code and list size.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn try_fetch(&self) -> PortResult<Vec<QuakeRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| PortError::Unavailable(e.to_string()))?;

        response
            .json::<Vec<QuakeRecord>>()
            .await
            .map_err(|e| PortError::Parse("quake history".to_string(), e.to_string()))
    }
}

#[async_trait]
impl QuakeFeed for P2pQuakeAdapter {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_recent(&self) -> FeedOutcome<Vec<QuakeRecord>> {
        match self.try_fetch().await {
            Ok(quakes) => {
                debug!("Fetched {} quake records.", quakes.len());
                FeedOutcome::Available(quakes)
            }
            Err(e) => {
                warn!("Failed to fetch earthquake info: {}", e);
                FeedOutcome::Unavailable
            }
        }
    }
}
