pub mod errors;
pub mod types;

pub use errors::{BridgeError, MessageError, WebpaneError, WhitelistError};
pub use types::{ErrorRecord, Platform, ViewState};

pub type Result<T> = std::result::Result<T, WebpaneError>;
