//! Command sink into the platform view layer.

use webpane_common::BridgeError;
use webpane_core::Command;

/// Outbound side of the native bridge.
///
/// Implementations forward commands to the engine hosting the view. The
/// shell treats dispatch failures as recoverable: they are logged and never
/// propagate to the host application.
pub trait NativeBridge {
    fn dispatch(&self, command: Command) -> Result<(), BridgeError>;

    /// The engine's default user agent with any override unset. The native
    /// side clears its override, reads the default, then restores the
    /// override before returning.
    fn default_user_agent(&self) -> Option<String> {
        None
    }
}
