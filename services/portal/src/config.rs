//! services/portal/src/config.rs
//!
//! Defines the service configuration and its loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_QUAKE_API_URL: &str = "https://api.p2pquake.net/v2/history?codes=551&limit=5";
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where article sources are read from.
#[derive(Clone, Debug, PartialEq)]
pub enum ArticlesLocation {
    /// Base URL of a static site serving `index.json` and the listed files.
    Http(String),
    /// Directory containing `index.json` and the listed files.
    Directory(PathBuf),
}

impl ArticlesLocation {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ArticlesLocation::Http(value.trim_end_matches('/').to_string())
        } else {
            ArticlesLocation::Directory(PathBuf::from(value))
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub articles: ArticlesLocation,
    pub quake_api_url: String,
    pub weather_api_url: String,
    pub allowed_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test builds so tests stay hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let articles_str =
            lookup("ARTICLES_SOURCE").unwrap_or_else(|| "./public/articles".to_string());
        if articles_str.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "ARTICLES_SOURCE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let quake_api_url =
            lookup("QUAKE_API_URL").unwrap_or_else(|| DEFAULT_QUAKE_API_URL.to_string());
        let weather_api_url =
            lookup("WEATHER_API_URL").unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string());
        let allowed_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        Ok(Self {
            bind_address,
            log_level,
            articles: ArticlesLocation::parse(&articles_str),
            quake_api_url,
            weather_api_url,
            allowed_origin,
        })
    }
}
