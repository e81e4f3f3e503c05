//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the send shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SEND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SEND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Send shortcut display for the message step help text
/// Ctrl+S works on all platforms (Cmd+S also works where the terminal passes it)
pub const SEND_SHORTCUT: &str = "Ctrl+S";
