//! services/portal/src/adapters/weather.rs
//!
//! Adapter for the Open-Meteo forecast API.
//! It implements the `WeatherFeed` port from the `core` crate.

use archive_core::domain::{Coordinates, WeatherSnapshot};
use archive_core::ports::{FeedOutcome, PortError, PortResult, WeatherFeed};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{instrument, warn};

#[derive(Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: i32,
}

/// Fetches current temperature and weather code for a coordinate.
#[derive(Clone)]
pub struct OpenMeteoAdapter {
    client: Client,
    base_url: String,
}

impl OpenMeteoAdapter {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn try_fetch(&self, coordinates: Coordinates) -> PortResult<WeatherSnapshot> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,weather_code".to_string(),
                ),
                ("timezone", "Asia/Tokyo".to_string()),
            ])
            .send()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| PortError::Unavailable(e.to_string()))?;

        let forecast = response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| PortError::Parse("forecast".to_string(), e.to_string()))?;

        Ok(WeatherSnapshot {
            coordinates,
            temperature: forecast.current.temperature_2m,
            weather_code: forecast.current.weather_code,
            fetched_at: Utc::now(),
        })
    }
}

#[async_trait]
impl WeatherFeed for OpenMeteoAdapter {
    #[instrument(skip(self))]
    async fn fetch_current(&self, coordinates: Coordinates) -> FeedOutcome<WeatherSnapshot> {
        match self.try_fetch(coordinates).await {
            Ok(snapshot) => FeedOutcome::Available(snapshot),
            Err(e) => {
                warn!("Failed to fetch weather info: {}", e);
                FeedOutcome::Unavailable
            }
        }
    }
}
