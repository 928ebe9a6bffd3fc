//! Per-instance composition of the browser-view core.

use tracing::{debug, warn};

use webpane_common::{ErrorRecord, Platform, ViewState};
use webpane_core::{
    interceptor, message, normalizer, version, whitelist::WhitelistCache, Command, Effect,
    ExternalOpener, LoadRequest, NativeEvent, NavigationMeta, ReduceContext,
    DEFAULT_ORIGIN_WHITELIST,
};

use crate::bridge::NativeBridge;
use crate::callbacks::Callbacks;

/// Configuration for one browser-view instance.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Glob patterns for allowed navigation origins.
    pub origin_whitelist: Vec<String>,
    /// Minimum platform version spec; `None` disables the gate.
    pub minimum_platform_version: Option<String>,
    /// Start in `Loading` instead of `Idle`.
    pub start_in_loading_state: bool,
    /// Override the engine's default user agent.
    pub user_agent: Option<String>,
    /// Script injected into the page when a navigation completes.
    pub injected_javascript: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            origin_whitelist: DEFAULT_ORIGIN_WHITELIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            minimum_platform_version: None,
            start_in_loading_state: false,
            user_agent: None,
            injected_javascript: None,
        }
    }
}

/// Which placeholder the host should render, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    None,
    Loading,
    Error(ErrorRecord),
    UnsupportedVersion,
}

/// One embedded browser view: owns the view state, feeds native events
/// through the core, and issues commands to the native layer.
pub struct WebPane<B: NativeBridge> {
    bridge: B,
    platform: Platform,
    config: ShellConfig,
    callbacks: Callbacks,
    opener: Option<Box<dyn ExternalOpener>>,
    whitelist: WhitelistCache,
    state: ViewState,
    start_url: Option<String>,
    title: String,
    can_go_back: bool,
    can_go_forward: bool,
    supported: bool,
    script_injected: bool,
}

impl<B: NativeBridge> WebPane<B> {
    pub fn new(
        bridge: B,
        platform: Platform,
        platform_version: &str,
        config: ShellConfig,
        callbacks: Callbacks,
    ) -> Self {
        let supported = match &config.minimum_platform_version {
            Some(minimum) => version::version_passes(platform_version, minimum),
            None => true,
        };
        if !supported {
            warn!(
                platform = %platform,
                version = platform_version,
                "platform version below supported minimum"
            );
        }
        let state = if config.start_in_loading_state {
            ViewState::Loading
        } else {
            ViewState::Idle
        };
        let whitelist = WhitelistCache::new(&config.origin_whitelist);
        debug!(platform = %platform, version = platform_version, supported, "view created");
        Self {
            bridge,
            platform,
            config,
            callbacks,
            opener: None,
            whitelist,
            state,
            start_url: None,
            title: String::new(),
            can_go_back: false,
            can_go_forward: false,
            supported,
            script_injected: false,
        }
    }

    pub fn with_opener(mut self, opener: Box<dyn ExternalOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    // -- Observable state --

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    pub fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    /// Effective user agent: the configured override, else the engine default.
    pub fn user_agent(&self) -> Option<String> {
        self.config
            .user_agent
            .clone()
            .or_else(|| self.bridge.default_user_agent())
    }

    pub fn placeholder(&self) -> Placeholder {
        if !self.supported {
            return Placeholder::UnsupportedVersion;
        }
        match &self.state {
            ViewState::Error(record) => Placeholder::Error(record.clone()),
            ViewState::Loading => Placeholder::Loading,
            ViewState::Idle => Placeholder::None,
        }
    }

    /// Replace the origin whitelist; matchers recompile on next use only if
    /// the value actually changed.
    pub fn set_origin_whitelist(&mut self, patterns: Vec<String>) {
        self.config.origin_whitelist = patterns;
    }

    // -- Native events --

    /// Process one native event. Events arrive and are processed strictly
    /// in order; everything happens synchronously within this call.
    pub fn handle_event(&mut self, event: NativeEvent) {
        if !self.supported {
            debug!("event ignored: unsupported platform version");
            return;
        }
        match event {
            NativeEvent::ShouldStartLoad {
                url,
                lock_identifier,
            } => self.handle_should_start_load(url, lock_identifier),
            NativeEvent::Message { url, data, meta } => self.handle_message(&url, &data, &meta),
            other => self.handle_lifecycle(other),
        }
    }

    fn handle_should_start_load(&mut self, url: String, lock_identifier: i64) {
        let request = LoadRequest {
            url,
            lock_identifier,
        };
        let decision = interceptor::decide(
            self.whitelist.get(&self.config.origin_whitelist),
            &request,
            self.callbacks.on_should_start_load.as_deref(),
            self.opener.as_deref(),
        );
        self.dispatch(decision);
    }

    fn handle_message(&mut self, url: &str, data: &str, meta: &NavigationMeta) {
        let result = message::relay(
            self.whitelist.get(&self.config.origin_whitelist),
            url,
            data,
            meta,
            self.callbacks.validate_data.as_deref(),
            self.callbacks.validate_meta.as_deref(),
        );
        match result {
            Ok(Some(envelope)) => {
                self.title = envelope.title.clone();
                self.can_go_back = envelope.can_go_back;
                self.can_go_forward = envelope.can_go_forward;
                match &self.callbacks.on_message {
                    Some(on_message) => on_message(&envelope),
                    None => debug!(url = %url, "message dropped: no host message handler"),
                }
            }
            Ok(None) => {}
            Err(err) => warn!(url = %url, %err, "message aborted by validator"),
        }
    }

    fn handle_lifecycle(&mut self, event: NativeEvent) {
        // The host error handler runs before the reduction so its verdict
        // can keep the view out of the error state.
        let error_suppressed = match &event {
            NativeEvent::LoadError {
                url,
                error,
                can_suppress,
            } => {
                let handled = match &self.callbacks.on_error {
                    Some(on_error) => on_error(error),
                    None => {
                        warn!(
                            url = %url,
                            code = error.code,
                            description = %error.description,
                            "load failed with no host error handler"
                        );
                        false
                    }
                };
                handled && *can_suppress
            }
            _ => false,
        };

        let reduction = {
            let ctx = ReduceContext {
                platform: self.platform,
                whitelist: self.whitelist.get(&self.config.origin_whitelist),
                start_url: self.start_url.as_deref(),
                error_suppressed,
            };
            normalizer::reduce(&self.state, &event, &ctx)
        };

        let completed = matches!(event, NativeEvent::LoadFinish { .. })
            && reduction.state == ViewState::Idle;

        self.state = reduction.state;
        self.start_url = reduction.start_url;
        for effect in reduction.effects {
            self.run_effect(effect);
        }
        if completed {
            self.inject_on_load();
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::NotifyLoadStart { url } => {
                self.script_injected = false;
                if let Some(cb) = &self.callbacks.on_load_start {
                    cb(&url);
                }
            }
            Effect::NotifyLoad { url } => {
                if let Some(cb) = &self.callbacks.on_load {
                    cb(&url);
                }
            }
            Effect::NotifyLoadEnd { url } => {
                if let Some(cb) = &self.callbacks.on_load_end {
                    cb(&url);
                }
            }
            Effect::NotifyHttpError {
                url,
                status_code,
                description,
            } => {
                if let Some(cb) = &self.callbacks.on_http_error {
                    cb(&url, status_code, &description);
                }
            }
            Effect::NotifyRenderProcessGone { did_crash } => {
                if let Some(cb) = &self.callbacks.on_render_process_gone {
                    cb(did_crash);
                }
            }
            Effect::NotifyContentProcessTerminated => {
                if let Some(cb) = &self.callbacks.on_content_process_did_terminate {
                    cb();
                }
            }
        }
    }

    fn inject_on_load(&mut self) {
        if self.script_injected {
            return;
        }
        if let Some(source) = self.config.injected_javascript.clone() {
            self.script_injected = true;
            self.dispatch(Command::InjectScript { source });
        }
    }

    // -- Imperative commands --

    pub fn go_back(&self) {
        self.dispatch(Command::GoBack);
    }

    pub fn go_forward(&self) {
        self.dispatch(Command::GoForward);
    }

    /// Reload the current page. Enters `Loading` before the native command
    /// so the placeholder is correct immediately.
    pub fn reload(&mut self) {
        self.state = ViewState::Loading;
        self.dispatch(Command::Reload);
    }

    /// Fire-and-forget stop signal; completion is not tracked.
    pub fn stop_loading(&self) {
        self.dispatch(Command::StopLoading);
    }

    pub fn request_focus(&self) {
        self.dispatch(Command::RequestFocus);
    }

    pub fn post_message(&self, data: &serde_json::Value) {
        match serde_json::to_string(data) {
            Ok(data) => self.dispatch(Command::PostMessage { data }),
            Err(err) => warn!(%err, "post_message payload not serializable"),
        }
    }

    pub fn inject_javascript(&self, source: impl Into<String>) {
        self.dispatch(Command::InjectScript {
            source: source.into(),
        });
    }

    fn dispatch(&self, command: Command) {
        if let Err(err) = self.bridge.dispatch(command) {
            warn!(%err, "native command failed");
        }
    }
}
