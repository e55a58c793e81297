pub mod clock;
pub mod protocol;
pub mod session;
pub mod state;
pub mod ws_handler;

// Re-export the main WebSocket handler so the binary can build the router.
pub use ws_handler::ws_handler;

use axum::{http::HeaderValue, routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Builds the service router: the session socket plus a liveness probe.
pub fn router(app_state: Arc<AppState>, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new().allow_origin(allowed_origin);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(|| async { "ok" }))
        .layer(cors)
        .with_state(app_state)
}
