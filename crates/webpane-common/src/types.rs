use serde::{Deserialize, Serialize};
use std::fmt;

/// Which native web engine is hosting the view.
///
/// Platform differences in the core are limited to the idle-transition rule:
/// Android leaves `Loading` when progress hits 100%, iOS when the finished
/// URL correlates with the recorded start URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Ios,
    Android,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
        }
    }
}

/// Last load failure reported by the native layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Platform error domain (e.g. `NSURLErrorDomain`); absent on Android.
    pub domain: Option<String>,
    pub code: i32,
    pub description: String,
}

/// Externally observable lifecycle phase of the view.
///
/// Exactly one state is active. `Error` always carries the record of the
/// failure that produced it; the record is overwritten by each new error and
/// is meaningless once the state moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    Idle,
    Loading,
    Error(ErrorRecord),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            ViewState::Error(record) => Some(record),
            _ => None,
        }
    }
}
