//! Terminal setup and configuration utilities.

use std::io::stdout;

use ratatui::crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use ratatui::crossterm::execute;

/// Guard that enables the keyboard enhancement protocol (for reliable
/// modifier reporting of the Ctrl+letter panel switches) and disables it
/// again on drop, even if the application panics.
pub struct TerminalEventGuard {
    keyboard_enhancement_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let mut guard = Self {
            keyboard_enhancement_enabled: false,
        };

        // Not fatal when unsupported; legacy terminals still deliver the
        // Ctrl combinations this client uses.
        if execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )
        .is_ok()
        {
            guard.keyboard_enhancement_enabled = true;
        }

        guard
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.keyboard_enhancement_enabled {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
    }
}
