//! services/portal/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser shell and the
//! portal. The browser renders the view model it receives and reports user
//! gestures back as actions.

use archive_core::app::Action;
use archive_core::view::{Page, WidgetUpdate};
use serde::{Deserialize, Serialize};

/// Shown when the article manifest cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "記事の読み込みに失敗しました。ページを再読み込みしてください。";

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A gesture bound to a node of the last rendered page, or the outcome of
    /// a geolocation prompt.
    Action(Action),
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Replace the header and main content; scroll to top if asked.
    Render { page: Page },

    /// Replace one feed widget in place.
    Widget { update: WidgetUpdate },

    /// New text for the header clock.
    Clock { text: String },

    /// Ask the browser for geolocation and answer with `location_granted` or
    /// `location_denied`.
    PromptLocation,

    /// The session cannot continue; the client should offer a reload.
    Error { message: String },
}
