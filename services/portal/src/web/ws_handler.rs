//! services/portal/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a WebSocket connection.
//! It opens a `Session`, then interleaves client frames and finished feed
//! fetches on a single task.

use crate::web::{
    protocol::{ClientMessage, ServerMessage},
    session::Session,
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New WebSocket connection established.");
    let (mut sender, mut receiver) = socket.split();

    // --- 1. Writer: everything the session emits goes out in order. ---
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ServerMessage>();
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize server message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                warn!("Failed to send message; client is gone.");
                break;
            }
        }
        let _ = sender.close().await;
    });

    // --- 2. Initialization Phase ---
    let (mut session, mut feed_rx) = match Session::open(app_state, outbound_tx).await {
        Ok(opened) => opened,
        Err(_) => {
            // The error message is already queued; the writer exits once it is sent.
            let _ = writer.await;
            return;
        }
    };

    // --- 3. Main Message Loop ---
    loop {
        tokio::select! {
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ClientMessage>(text.as_str()) {
                        Ok(message) => session.handle_client(message),
                        Err(e) => warn!(session = %session.id(), "Failed to deserialize client message: {}", e),
                    }
                }
                Some(Ok(Message::Close(_))) => {
                    info!("Client sent close message.");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("WebSocket error: {}", e);
                    break;
                }
                None => {
                    info!("Client disconnected.");
                    break;
                }
            },
            Some(event) = feed_rx.recv() => session.handle_feed(event),
        }
    }

    // --- 4. Cleanup ---
    session.close();
    drop(session);
    writer.abort();
    info!("WebSocket connection closed.");
}
