//! services/portal/src/web/clock.rs
//!
//! The header clock: a once-per-second task sending the formatted local time.

use crate::web::protocol::ServerMessage;
use archive_core::format::format_clock;
use chrono::Local;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns at most one running clock task.
#[derive(Default)]
pub struct ClockTask {
    token: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl ClockTask {
    /// Cancels the running task, if any, and starts a fresh one that ticks
    /// immediately and then every `CLOCK_INTERVAL`.
    pub fn restart(&mut self, outbound: UnboundedSender<ServerMessage>) {
        self.stop();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(CLOCK_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let text = format_clock(Local::now().naive_local());
                        if outbound.send(ServerMessage::Clock { text }).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Clock task stopped.");
        });

        self.token = Some(token);
        self.handle = Some(handle);
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ClockTask {
    fn drop(&mut self) {
        self.stop();
    }
}
