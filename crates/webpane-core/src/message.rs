//! Whitelist-gated message relay from page content to the host.
//!
//! A message is dropped silently when its reported URL fails the whitelist
//! or its payload is not valid JSON. Caller-supplied validators may reject
//! a message, which aborts that single delivery and nothing else.

use tracing::{debug, warn};
use webpane_common::MessageError;

use crate::events::{MessageEnvelope, NavigationMeta};
use crate::whitelist::CompiledWhitelist;

/// Validates and may transform the parsed message payload.
pub type DataValidator<'a> = &'a dyn Fn(&serde_json::Value) -> Result<serde_json::Value, String>;

/// Validates the navigation metadata attached to the message.
pub type MetaValidator<'a> = &'a dyn Fn(&NavigationMeta) -> Result<(), String>;

/// Relay one native message.
///
/// `Ok(None)` is a silent drop (unauthorized origin, non-JSON payload);
/// `Err` is a validator rejection the caller should log; `Ok(Some(_))` is
/// ready for the host's message callback.
pub fn relay(
    whitelist: &CompiledWhitelist,
    url: &str,
    data: &str,
    meta: &NavigationMeta,
    validate_data: Option<DataValidator<'_>>,
    validate_meta: Option<MetaValidator<'_>>,
) -> Result<Option<MessageEnvelope>, MessageError> {
    if !whitelist.passes(url).is_pass() {
        debug!(url = %url, "message dropped: origin not whitelisted");
        return Ok(None);
    }

    let parsed: serde_json::Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(err) => {
            warn!(url = %url, %err, "message dropped: payload is not valid JSON");
            return Ok(None);
        }
    };

    let validated = match validate_data {
        Some(validate) => validate(&parsed).map_err(MessageError::DataRejected)?,
        None => parsed,
    };
    let data = serde_json::to_string(&validated)
        .map_err(|err| MessageError::InvalidPayload(err.to_string()))?;

    if let Some(validate) = validate_meta {
        validate(meta).map_err(MessageError::MetaRejected)?;
    }

    Ok(Some(MessageEnvelope {
        url: meta.url.clone(),
        loading: meta.loading,
        title: meta.title.clone(),
        can_go_back: meta.can_go_back,
        can_go_forward: meta.can_go_forward,
        lock_identifier: meta.lock_identifier,
        data,
    }))
}
