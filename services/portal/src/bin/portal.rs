//! services/portal/src/bin/portal.rs

use archive_core::ports::ArticleSource;
use axum::http::HeaderValue;
use portal_lib::{
    adapters::{FsArticleSource, HttpArticleSource, OpenMeteoAdapter, P2pQuakeAdapter},
    config::{ArticlesLocation, Config},
    error::PortalError,
    web::{router, state::AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), PortalError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting portal...");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::builder()
        .user_agent(concat!("reflection-archive-portal/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let articles: Arc<dyn ArticleSource> = match &config.articles {
        ArticlesLocation::Http(base_url) => {
            info!("Reading articles from {}", base_url);
            Arc::new(HttpArticleSource::new(http.clone(), base_url.clone()))
        }
        ArticlesLocation::Directory(dir) => {
            info!("Reading articles from {}", dir.display());
            Arc::new(FsArticleSource::new(dir.clone()))
        }
    };
    let quake_feed = Arc::new(P2pQuakeAdapter::new(http.clone(), config.quake_api_url.clone()));
    let weather_feed = Arc::new(OpenMeteoAdapter::new(http, config.weather_api_url.clone()));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        articles,
        quake_feed,
        weather_feed,
    });

    // --- 4. Create the Web Router ---
    let allowed_origin = config.allowed_origin.parse::<HeaderValue>().map_err(|e| {
        PortalError::Internal(format!(
            "Invalid ALLOWED_ORIGIN '{}': {}",
            config.allowed_origin, e
        ))
    })?;
    let app = router(app_state, allowed_origin);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
