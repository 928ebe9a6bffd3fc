//! Platform-independent core of the embeddable browser view.
//!
//! Sits between raw native engine callbacks (WKWebView, Android WebView) and
//! the host application's callback surface:
//! - Origin whitelist compilation and matching
//! - Platform version gating
//! - Navigation lifecycle normalization (view state machine)
//! - Load-request interception with per-attempt decisions
//! - Whitelist-gated, validator-checked message relay

pub mod commands;
pub mod events;
pub mod interceptor;
pub mod message;
pub mod normalizer;
pub mod version;
pub mod whitelist;

pub use commands::Command;
pub use events::{MessageEnvelope, NativeEvent, NavigationMeta};
pub use interceptor::{ExternalOpener, LoadRequest};
pub use normalizer::{reduce, Effect, ReduceContext, Reduction};
pub use version::version_passes;
pub use whitelist::{CompiledWhitelist, WhitelistCache, WhitelistVerdict, DEFAULT_ORIGIN_WHITELIST};
