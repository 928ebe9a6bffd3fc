//! Load-request interception.
//!
//! Every `ShouldStartLoad` query carries a lock identifier and must receive
//! exactly one decision, synchronously. Policy order: whitelist first, then
//! the host's override. A whitelist block additionally tries to hand https
//! URLs to the OS-level opener so taps on external links still go somewhere;
//! that hand-off is fire-and-forget and never affects the decision.

use tracing::{debug, warn};
use webpane_common::BridgeError;

use crate::commands::Command;
use crate::whitelist::CompiledWhitelist;

/// A native query asking whether a navigation attempt may proceed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub url: String,
    pub lock_identifier: i64,
}

/// OS-level URL opener (browser, mail client, ...).
///
/// Failures are the caller's to log; they must never propagate into the
/// load decision.
pub trait ExternalOpener {
    fn can_open(&self, url: &str) -> bool;
    fn open(&self, url: &str) -> Result<(), BridgeError>;
}

/// Decide one navigation attempt. Always returns exactly one
/// `LoadRequestDecision` carrying the request's lock identifier.
pub fn decide(
    whitelist: &CompiledWhitelist,
    request: &LoadRequest,
    host_override: Option<&dyn Fn(&LoadRequest) -> bool>,
    opener: Option<&dyn ExternalOpener>,
) -> Command {
    let mut allow = true;

    if !whitelist.passes(&request.url).is_pass() {
        allow = false;
        warn!(
            url = %request.url,
            lock = request.lock_identifier,
            "navigation blocked: origin not whitelisted"
        );
        hand_off_externally(&request.url, opener);
    } else if let Some(decide) = host_override {
        allow = decide(request);
        if !allow {
            debug!(
                url = %request.url,
                lock = request.lock_identifier,
                "navigation blocked by host override"
            );
        }
    }

    Command::LoadRequestDecision {
        allow,
        lock_identifier: request.lock_identifier,
        url: request.url.clone(),
    }
}

fn hand_off_externally(url: &str, opener: Option<&dyn ExternalOpener>) {
    let Some(opener) = opener else {
        return;
    };
    if !url.starts_with("https:") || !opener.can_open(url) {
        warn!(url = %url, "can't open url: unsupported scheme or no handler");
        return;
    }
    if let Err(err) = opener.open(url) {
        warn!(url = %url, %err, "external open failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn whitelist() -> CompiledWhitelist {
        CompiledWhitelist::compile(&["https://app.example.com".to_string()])
    }

    #[derive(Default)]
    struct RecordingOpener {
        openable: bool,
        failing: bool,
        opened: RefCell<Vec<String>>,
    }

    impl ExternalOpener for RecordingOpener {
        fn can_open(&self, _url: &str) -> bool {
            self.openable
        }

        fn open(&self, url: &str) -> Result<(), BridgeError> {
            if self.failing {
                return Err(BridgeError::OpenerFailed("no activity".into()));
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn request(url: &str, lock: i64) -> LoadRequest {
        LoadRequest {
            url: url.into(),
            lock_identifier: lock,
        }
    }

    // -- Whitelist policy --

    #[test]
    fn whitelisted_url_is_allowed_by_default() {
        let cmd = decide(&whitelist(), &request("https://app.example.com/home", 1), None, None);
        assert_eq!(
            cmd,
            Command::LoadRequestDecision {
                allow: true,
                lock_identifier: 1,
                url: "https://app.example.com/home".into(),
            }
        );
    }

    #[test]
    fn unwhitelisted_url_is_denied_with_same_lock() {
        let cmd = decide(&whitelist(), &request("https://elsewhere.example/", 9), None, None);
        assert_eq!(
            cmd,
            Command::LoadRequestDecision {
                allow: false,
                lock_identifier: 9,
                url: "https://elsewhere.example/".into(),
            }
        );
    }

    #[test]
    fn indeterminate_url_is_denied() {
        let cmd = decide(
            &whitelist(),
            &request("https://app.example.com@evil.example/", 2),
            None,
            None,
        );
        assert!(matches!(
            cmd,
            Command::LoadRequestDecision { allow: false, .. }
        ));
    }

    // -- External hand-off --

    #[test]
    fn blocked_https_url_goes_to_opener() {
        let opener = RecordingOpener {
            openable: true,
            ..Default::default()
        };
        decide(
            &whitelist(),
            &request("https://elsewhere.example/doc", 3),
            None,
            Some(&opener),
        );
        assert_eq!(
            opener.opened.borrow().as_slice(),
            ["https://elsewhere.example/doc"]
        );
    }

    #[test]
    fn blocked_non_https_url_is_not_handed_off() {
        let opener = RecordingOpener {
            openable: true,
            ..Default::default()
        };
        decide(
            &whitelist(),
            &request("ftp://files.example/", 4),
            None,
            Some(&opener),
        );
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn opener_failure_does_not_change_the_decision() {
        let opener = RecordingOpener {
            openable: true,
            failing: true,
            ..Default::default()
        };
        let cmd = decide(
            &whitelist(),
            &request("https://elsewhere.example/", 5),
            None,
            Some(&opener),
        );
        assert!(matches!(
            cmd,
            Command::LoadRequestDecision {
                allow: false,
                lock_identifier: 5,
                ..
            }
        ));
    }

    #[test]
    fn allowed_url_never_touches_the_opener() {
        let opener = RecordingOpener {
            openable: true,
            ..Default::default()
        };
        decide(
            &whitelist(),
            &request("https://app.example.com/", 6),
            None,
            Some(&opener),
        );
        assert!(opener.opened.borrow().is_empty());
    }

    // -- Host override --

    #[test]
    fn host_override_can_deny_a_whitelisted_url() {
        let deny = |_: &LoadRequest| false;
        let cmd = decide(
            &whitelist(),
            &request("https://app.example.com/", 7),
            Some(&deny),
            None,
        );
        assert!(matches!(
            cmd,
            Command::LoadRequestDecision { allow: false, .. }
        ));
    }

    #[test]
    fn host_override_is_skipped_when_whitelist_already_denied() {
        let called = RefCell::new(false);
        let spy = |_: &LoadRequest| {
            *called.borrow_mut() = true;
            true
        };
        let cmd = decide(
            &whitelist(),
            &request("https://elsewhere.example/", 8),
            Some(&spy),
            None,
        );
        assert!(!*called.borrow());
        assert!(matches!(
            cmd,
            Command::LoadRequestDecision { allow: false, .. }
        ));
    }
}
