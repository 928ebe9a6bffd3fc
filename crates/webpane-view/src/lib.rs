//! Platform-facing browser-view component.
//!
//! Composes the core (whitelist, version gate, normalizer, interceptor,
//! message channel) into a per-instance shell that:
//! - Dispatches imperative commands through a [`NativeBridge`]
//! - Feeds native events through the reducer and runs the resulting effects
//! - Gates everything behind the minimum-platform-version check
//! - Reports which placeholder (loading / error / unsupported) applies
//!
//! The native engine, view layout, and transport are external collaborators;
//! this crate only speaks `NativeEvent` in and `Command` out.

pub mod bridge;
pub mod callbacks;
pub mod shell;

pub use bridge::NativeBridge;
pub use callbacks::Callbacks;
pub use shell::{Placeholder, ShellConfig, WebPane};
