//! services/portal/src/web/session.rs
//!
//! One portal session per connection. The session owns the controller and
//! carries out the effects it asks for: sending renders, starting feed
//! fetches and restarting the clock.
//!
//! Fetches run as spawned tasks and report back through a channel, so the
//! controller is only ever touched from the connection's own loop.

use crate::web::clock::ClockTask;
use crate::web::protocol::{ClientMessage, ServerMessage, LOAD_FAILED_MESSAGE};
use crate::web::state::AppState;
use archive_core::app::{Action, Effects, FeedEvent, NewsApp, RefreshRequest};
use archive_core::ports::PortResult;
use archive_core::repository::ArticleRepository;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};
use uuid::Uuid;

pub struct Session {
    id: Uuid,
    app: NewsApp,
    app_state: Arc<AppState>,
    outbound: UnboundedSender<ServerMessage>,
    feed_tx: UnboundedSender<FeedEvent>,
    clock: ClockTask,
}

impl Session {
    /// Loads the articles and renders the first page.
    ///
    /// If the manifest cannot be loaded the client is sent an error message and
    /// the error is returned; the session does not start.
    pub async fn open(
        app_state: Arc<AppState>,
        outbound: UnboundedSender<ServerMessage>,
    ) -> PortResult<(Self, UnboundedReceiver<FeedEvent>)> {
        let id = Uuid::new_v4();
        let repository = ArticleRepository::new(app_state.articles.clone());
        let articles = match repository.load().await {
            Ok(articles) => articles,
            Err(e) => {
                error!(session = %id, "Failed to load articles: {}", e);
                let _ = outbound.send(ServerMessage::Error {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                });
                return Err(e);
            }
        };

        let (feed_tx, feed_rx) = mpsc::unbounded_channel();
        let mut session = Self {
            id,
            app: NewsApp::new(articles),
            app_state,
            outbound,
            feed_tx,
            clock: ClockTask::default(),
        };
        info!(session = %session.id, "Session opened.");

        let effects = session.app.start(Local::now());
        session.apply(effects);
        Ok((session, feed_rx))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn app(&self) -> &NewsApp {
        &self.app
    }

    pub fn handle_client(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::Action(action) => self.handle_action(action),
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let effects = self.app.dispatch(action, Local::now());
        self.apply(effects);
    }

    pub fn handle_feed(&mut self, event: FeedEvent) {
        if let Some(update) = self.app.apply_feed(event, Local::now()) {
            self.send(ServerMessage::Widget { update });
        }
    }

    pub fn close(&mut self) {
        self.clock.stop();
        info!(session = %self.id, "Session closed.");
    }

    fn apply(&mut self, effects: Effects) {
        if let Some(page) = effects.page {
            self.send(ServerMessage::Render { page });
        }
        if effects.restart_clock {
            self.clock.restart(self.outbound.clone());
        }
        if effects.prompt_location {
            self.send(ServerMessage::PromptLocation);
        }
        for request in effects.refresh {
            self.spawn_refresh(request);
        }
    }

    /// Fetches are never cancelled. A result that arrives after the view
    /// changed still reaches `apply_feed`, which decides what is shown.
    fn spawn_refresh(&self, request: RefreshRequest) {
        let feed_tx = self.feed_tx.clone();
        let session = self.id;
        match request {
            RefreshRequest::Quakes => {
                let feed = self.app_state.quake_feed.clone();
                tokio::spawn(async move {
                    let outcome = feed.fetch_recent().await;
                    if feed_tx.send(FeedEvent::Quakes(outcome)).is_err() {
                        debug!(%session, "Session gone before quake refresh finished.");
                    }
                });
            }
            RefreshRequest::Weather(location) => {
                let feed = self.app_state.weather_feed.clone();
                tokio::spawn(async move {
                    let outcome = feed.fetch_current(location.coordinates).await;
                    if feed_tx.send(FeedEvent::Weather { location, outcome }).is_err() {
                        debug!(%session, "Session gone before weather refresh finished.");
                    }
                });
            }
        }
    }

    fn send(&self, message: ServerMessage) {
        if self.outbound.send(message).is_err() {
            debug!(session = %self.id, "Outbound channel closed; dropping message.");
        }
    }
}
