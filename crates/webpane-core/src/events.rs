//! Inbound native event types and the host-facing message envelope.

use serde::{Deserialize, Serialize};
use webpane_common::ErrorRecord;

/// Navigation metadata the native layer reports alongside messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationMeta {
    pub url: String,
    pub loading: bool,
    pub title: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub lock_identifier: i64,
}

/// Raw lifecycle events delivered by the native engine, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NativeEvent {
    LoadStart {
        url: String,
    },
    LoadProgress {
        url: String,
        /// 0.0 to 100.0.
        percent: f64,
    },
    LoadFinish {
        url: String,
    },
    LoadError {
        url: String,
        error: ErrorRecord,
        /// Whether a host error handler is allowed to keep the view out of
        /// the error state for this failure.
        can_suppress: bool,
    },
    HttpError {
        url: String,
        status_code: i32,
        description: String,
    },
    RenderProcessGone {
        did_crash: bool,
    },
    ContentProcessTerminated,
    /// Query: may this navigation attempt proceed? Must be answered exactly
    /// once, keyed by `lock_identifier`.
    ShouldStartLoad {
        url: String,
        lock_identifier: i64,
    },
    /// Content posted a message to the host.
    Message {
        url: String,
        /// Serialized payload, validated before delivery.
        data: String,
        meta: NavigationMeta,
    },
}

/// Validated message as delivered to the host's message callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    pub url: String,
    pub loading: bool,
    pub title: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub lock_identifier: i64,
    /// Payload re-serialized after the data validator ran.
    pub data: String,
}
