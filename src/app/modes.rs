//! Input mode state machine.
//!
//! - **Editing**: keys edit the input buffer; Enter submits.
//! - **Browsing**: keys move through the history table; Enter recalls the
//!   selected entry's text into the input buffer.

/// Current input handling mode.
///
/// Controls which keybindings are active and which footer hints are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typing into the input buffer.
    #[default]
    Editing,

    /// Navigating the history table.
    Browsing,
}
