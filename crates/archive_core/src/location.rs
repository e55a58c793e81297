//! crates/archive_core/src/location.rs
//!
//! Where weather is fetched for, and how that location is labelled.

use crate::domain::Coordinates;
use serde::Serialize;

/// Tokyo, used whenever the browser cannot or may not provide coordinates.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 35.6895,
    longitude: 139.6917,
};

pub const CURRENT_LOCATION_LABEL: &str = "現在地";
pub const FALLBACK_LABEL: &str = "東京(標準)";
pub const STARTUP_LABEL: &str = "東京";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherLocation {
    pub coordinates: Coordinates,
    pub label: String,
}

impl WeatherLocation {
    /// Coordinates the user granted.
    pub fn current(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            label: CURRENT_LOCATION_LABEL.to_string(),
        }
    }

    /// The default city after permission was denied or is unsupported.
    pub fn fallback() -> Self {
        Self {
            coordinates: FALLBACK_COORDINATES,
            label: FALLBACK_LABEL.to_string(),
        }
    }

    /// The default city before the user has been asked anything.
    pub fn startup_default() -> Self {
        Self {
            coordinates: FALLBACK_COORDINATES,
            label: STARTUP_LABEL.to_string(),
        }
    }
}

/// Geolocation permission as last reported by the browser.
/// A grant is kept for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationPermission {
    #[default]
    Unknown,
    Granted(Coordinates),
    Denied,
}
