//! Host application callback surface.

use std::fmt;

use webpane_common::ErrorRecord;
use webpane_core::{LoadRequest, MessageEnvelope, NavigationMeta};

/// Callbacks and validators supplied by the embedding application.
///
/// All fields are optional; an unset callback means the corresponding
/// notification is dropped (with a log line where that matters). The
/// `on_error` callback returns whether it handled the failure; a handled
/// failure keeps the view out of the error state when the event permits
/// suppression. `on_should_start_load` overrides the default allow decision
/// for navigations that already passed the whitelist.
#[derive(Default)]
pub struct Callbacks {
    pub on_load_start: Option<Box<dyn Fn(&str)>>,
    pub on_load: Option<Box<dyn Fn(&str)>>,
    pub on_load_end: Option<Box<dyn Fn(&str)>>,
    pub on_error: Option<Box<dyn Fn(&ErrorRecord) -> bool>>,
    pub on_http_error: Option<Box<dyn Fn(&str, i32, &str)>>,
    pub on_render_process_gone: Option<Box<dyn Fn(bool)>>,
    pub on_content_process_did_terminate: Option<Box<dyn Fn()>>,
    pub on_message: Option<Box<dyn Fn(&MessageEnvelope)>>,
    pub on_should_start_load: Option<Box<dyn Fn(&LoadRequest) -> bool>>,
    pub validate_data: Option<Box<dyn Fn(&serde_json::Value) -> Result<serde_json::Value, String>>>,
    pub validate_meta: Option<Box<dyn Fn(&NavigationMeta) -> Result<(), String>>>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_load_start", &self.on_load_start.is_some())
            .field("on_load", &self.on_load.is_some())
            .field("on_load_end", &self.on_load_end.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_http_error", &self.on_http_error.is_some())
            .field(
                "on_render_process_gone",
                &self.on_render_process_gone.is_some(),
            )
            .field(
                "on_content_process_did_terminate",
                &self.on_content_process_did_terminate.is_some(),
            )
            .field("on_message", &self.on_message.is_some())
            .field("on_should_start_load", &self.on_should_start_load.is_some())
            .field("validate_data", &self.validate_data.is_some())
            .field("validate_meta", &self.validate_meta.is_some())
            .finish()
    }
}
