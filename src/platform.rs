//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for the form shortcuts
/// - macOS: SUPER (Cmd key) or CONTROL
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::SUPER.union(KeyModifiers::CONTROL);

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL;

/// Continue / submit shortcut display
#[cfg(target_os = "macos")]
pub const FORWARD_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const FORWARD_SHORTCUT: &str = "Ctrl+N";

/// Back shortcut display
#[cfg(target_os = "macos")]
pub const BACK_SHORTCUT: &str = "Cmd+B";

#[cfg(not(target_os = "macos"))]
pub const BACK_SHORTCUT: &str = "Ctrl+B";

/// Theme cycling shortcut display
#[cfg(target_os = "macos")]
pub const THEME_SHORTCUT: &str = "Cmd+T";

#[cfg(not(target_os = "macos"))]
pub const THEME_SHORTCUT: &str = "Ctrl+T";

/// Whether `modifiers` contain a shortcut modifier
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(SHORTCUT_MODIFIERS)
}
