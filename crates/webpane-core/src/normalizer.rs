//! Navigation lifecycle normalization.
//!
//! A pure reducer maps each native lifecycle event plus the current view
//! state to a new state and a list of effects (host callback notifications).
//! The caller owns all mutation: it feeds the previous state and start URL
//! in, applies the reduction, and executes the effects.
//!
//! Whitelist gate: progress and finish events only advance the state when
//! their URL passes the whitelist, so an intercepted-but-still-reported
//! redirect can neither flicker the state nor look like a completed load.

use tracing::{debug, warn};
use webpane_common::{Platform, ViewState};

use crate::events::NativeEvent;
use crate::whitelist::CompiledWhitelist;

/// Host notifications produced by a reduction, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    NotifyLoadStart { url: String },
    NotifyLoad { url: String },
    NotifyLoadEnd { url: String },
    NotifyHttpError {
        url: String,
        status_code: i32,
        description: String,
    },
    NotifyRenderProcessGone { did_crash: bool },
    NotifyContentProcessTerminated,
}

/// Read-only inputs to a reduction beyond state and event.
pub struct ReduceContext<'a> {
    pub platform: Platform,
    pub whitelist: &'a CompiledWhitelist,
    /// URL recorded at the most recent load-start, for finish correlation.
    pub start_url: Option<&'a str>,
    /// For `LoadError` only: the host handled the failure and the error
    /// state must not be entered.
    pub error_suppressed: bool,
}

/// Result of reducing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub state: ViewState,
    pub start_url: Option<String>,
    pub effects: Vec<Effect>,
}

/// Reduce one native event against the current view state.
///
/// `ShouldStartLoad` and `Message` are not lifecycle events; they are
/// handled by the interceptor and the message channel and reduce to no-ops
/// here.
pub fn reduce(state: &ViewState, event: &NativeEvent, ctx: &ReduceContext<'_>) -> Reduction {
    let mut out = Reduction {
        state: state.clone(),
        start_url: ctx.start_url.map(str::to_owned),
        effects: Vec::new(),
    };

    match event {
        NativeEvent::LoadStart { url } => {
            out.start_url = Some(url.clone());
            out.effects.push(Effect::NotifyLoadStart { url: url.clone() });
        }

        NativeEvent::LoadProgress { url, percent } => {
            if !ctx.whitelist.passes(url).is_pass() {
                debug!(url = %url, "progress ignored: origin not whitelisted");
                return out;
            }
            // Android reports no usable finish correlation; full progress
            // while loading is its idle transition.
            if ctx.platform == Platform::Android && *percent >= 100.0 && state.is_loading() {
                out.state = ViewState::Idle;
            }
        }

        NativeEvent::LoadFinish { url } => {
            // Load and load-end fire regardless of the whitelist.
            out.effects.push(Effect::NotifyLoad { url: url.clone() });
            out.effects.push(Effect::NotifyLoadEnd { url: url.clone() });
            if !ctx.whitelist.passes(url).is_pass() {
                debug!(url = %url, "finish ignored: origin not whitelisted");
                return out;
            }
            let correlated = match ctx.platform {
                // WKWebView reports finishes for subframe navigations too;
                // only the one matching the recorded start URL ends the load.
                Platform::Ios => url.is_empty() || ctx.start_url == Some(url.as_str()),
                Platform::Android => true,
            };
            if correlated {
                out.state = ViewState::Idle;
            }
        }

        NativeEvent::LoadError { url, error, .. } => {
            if ctx.error_suppressed {
                debug!(url = %url, code = error.code, "load failure suppressed by host");
            } else {
                warn!(url = %url, code = error.code, description = %error.description, "load failed");
                out.state = ViewState::Error(error.clone());
            }
        }

        NativeEvent::HttpError {
            url,
            status_code,
            description,
        } => {
            out.effects.push(Effect::NotifyHttpError {
                url: url.clone(),
                status_code: *status_code,
                description: description.clone(),
            });
        }

        NativeEvent::RenderProcessGone { did_crash } => {
            warn!(did_crash, "render process gone");
            out.effects
                .push(Effect::NotifyRenderProcessGone { did_crash: *did_crash });
        }

        NativeEvent::ContentProcessTerminated => {
            warn!("content process terminated");
            out.effects.push(Effect::NotifyContentProcessTerminated);
        }

        NativeEvent::ShouldStartLoad { .. } | NativeEvent::Message { .. } => {}
    }

    out
}
