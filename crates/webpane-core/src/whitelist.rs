//! Origin whitelist: glob patterns compiled to anchored matchers.
//!
//! A pattern like `https://*` is matched against the *origin* of a candidate
//! URL (scheme + authority, no path). The blank-origin sentinel is always
//! part of the compiled set so `about:blank` stays loadable. Matching is
//! deliberately tri-state: a URL whose textual origin prefix diverges from
//! its parsed origin (userinfo tricks, odd encodings) is neither a pass nor
//! a plain fail but indeterminate, and every caller blocks on it.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;
use url::Url;

/// Sentinel pattern implicitly prepended to every whitelist.
pub const BLANK_ORIGIN_SENTINEL: &str = "about:blank";

/// Default whitelist applied when the host does not supply one.
pub const DEFAULT_ORIGIN_WHITELIST: &[&str] = &["http://*", "https://*"];

/// Outcome of testing a URL against a compiled whitelist.
///
/// Only `Pass` authorizes anything; `Fail` and `Indeterminate` both block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistVerdict {
    Pass,
    Fail,
    /// The URL's textual origin prefix does not agree with its parsed
    /// origin. Treated as a block everywhere.
    Indeterminate,
}

impl WhitelistVerdict {
    pub fn is_pass(self) -> bool {
        matches!(self, WhitelistVerdict::Pass)
    }
}

/// A whitelist compiled into anchored regex matchers.
#[derive(Debug)]
pub struct CompiledWhitelist {
    matchers: Vec<Regex>,
}

impl CompiledWhitelist {
    /// Compile glob patterns into matchers, sentinel first.
    ///
    /// `*` matches any character sequence; everything else is literal.
    /// A pattern that fails to compile is skipped with a warning, which
    /// can only make the whitelist stricter.
    pub fn compile(patterns: &[String]) -> Self {
        let mut matchers = Vec::with_capacity(patterns.len() + 1);
        let all = std::iter::once(BLANK_ORIGIN_SENTINEL).chain(patterns.iter().map(String::as_str));
        for pattern in all {
            match Regex::new(&glob_to_anchored_regex(pattern)) {
                Ok(re) => matchers.push(re),
                Err(err) => warn!(pattern = %pattern, %err, "origin pattern rejected"),
            }
        }
        Self { matchers }
    }

    pub fn passes(&self, url: &str) -> WhitelistVerdict {
        passes(self, url)
    }
}

/// Recompiles only when the pattern list actually changes.
///
/// Keyed by value: two hosts supplying equal pattern vectors share the same
/// compiled behavior, regardless of allocation identity.
#[derive(Debug)]
pub struct WhitelistCache {
    patterns: Vec<String>,
    compiled: CompiledWhitelist,
}

impl WhitelistCache {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.to_vec(),
            compiled: CompiledWhitelist::compile(patterns),
        }
    }

    pub fn get(&mut self, patterns: &[String]) -> &CompiledWhitelist {
        if self.patterns != patterns {
            self.patterns = patterns.to_vec();
            self.compiled = CompiledWhitelist::compile(patterns);
        }
        &self.compiled
    }
}

fn glob_to_anchored_regex(pattern: &str) -> String {
    let escaped = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^{escaped}$")
}

fn origin_regex() -> &'static Regex {
    static ORIGIN_RE: OnceLock<Regex> = OnceLock::new();
    ORIGIN_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+\-.]+:(//)?[^/]*").expect("static origin pattern")
    })
}

/// Extract the `scheme:[//]authority` prefix of a URL, up to the first path
/// separator. Empty string when no scheme is recognizable.
pub fn extract_origin(url: &str) -> &str {
    origin_regex().find(url).map(|m| m.as_str()).unwrap_or("")
}

/// Test a URL against a compiled whitelist.
///
/// Fails fast on blank URLs and URLs without a recognizable scheme. For
/// URLs with a tuple origin (http, https, ws, ftp) the textual prefix must
/// agree with the parsed origin, otherwise the verdict is indeterminate —
/// this catches URLs crafted so the visible prefix lies about the actual
/// origin (e.g. `https://trusted.example@evil.example/`).
pub fn passes(compiled: &CompiledWhitelist, url: &str) -> WhitelistVerdict {
    if url.trim().is_empty() {
        return WhitelistVerdict::Fail;
    }
    let origin = extract_origin(url);
    if origin.is_empty() {
        return WhitelistVerdict::Fail;
    }
    match Url::parse(url) {
        Ok(parsed) => {
            let parsed_origin = parsed.origin();
            // Opaque origins (about:, data:, custom schemes) have nothing to
            // cross-check; the textual origin is all there is.
            if parsed_origin.is_tuple() && parsed_origin.ascii_serialization() != origin {
                return WhitelistVerdict::Indeterminate;
            }
        }
        Err(_) => return WhitelistVerdict::Indeterminate,
    }
    if compiled.matchers.iter().any(|m| m.is_match(origin)) {
        WhitelistVerdict::Pass
    } else {
        WhitelistVerdict::Fail
    }
}
