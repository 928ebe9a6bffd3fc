//! Outbound imperative commands dispatched to the native engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    GoBack,
    GoForward,
    Reload,
    StopLoading,
    RequestFocus,
    PostMessage {
        data: String,
    },
    /// Answer to a `ShouldStartLoad` query, keyed by its lock identifier.
    LoadRequestDecision {
        allow: bool,
        lock_identifier: i64,
        url: String,
    },
    InjectScript {
        source: String,
    },
}
