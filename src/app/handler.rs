//! Event handling and state transition logic.
//!
//! [`handle_event`] is the reducer of the plugin: it pattern-matches an
//! [`Event`], mutates [`AppState`] (delegating the request lifecycle to the
//! dispatcher), and returns the actions the shim must perform.
//!
//! # Event Types
//!
//! - **Editing**: `Char`, `Newline`, `Backspace`, `ClearInput`, `Submit`
//! - **Navigation**: `BrowseHistory`, `EditInput`, `KeyDown`, `KeyUp`,
//!   `RecallSelected`, `CloseFocus`
//! - **Host**: `PermissionsResult`, `ResponseSettled`
//!
//! # Example
//!
//! ```
//! use truthlens::{handle_event, Action, AppState, Event, Theme};
//!
//! let mut state = AppState::new("http://127.0.0.1:8000/predict", Theme::default(), None);
//! handle_event(&mut state, &Event::PermissionsResult { granted: true });
//! for c in "Aliens built the pyramids".chars() {
//!     handle_event(&mut state, &Event::Char(c));
//! }
//!
//! let (_, actions) = handle_event(&mut state, &Event::Submit);
//! assert!(matches!(actions.as_slice(), [Action::SendRequest(_)]));
//! assert!(state.ui().loading);
//! ```

use super::dispatcher;
use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::transport::TraceContext;

/// Events triggered by user input or the plugin host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the input buffer (Editing mode only).
    Char(char),
    /// Appends a line break to the input buffer (Editing mode only).
    Newline,
    /// Removes the last character of the input buffer (Editing mode only).
    Backspace,
    /// Empties the input buffer (Editing mode only).
    ClearInput,
    /// Dispatches the input buffer for classification.
    Submit,

    /// Switches to history browsing.
    BrowseHistory,
    /// Switches back to editing the input buffer.
    EditInput,
    /// Moves history selection down (wraps to top). From editing mode it
    /// starts browsing at the newest entry.
    KeyDown,
    /// Moves history selection up (wraps to bottom). From editing mode it
    /// starts browsing at the oldest entry.
    KeyUp,
    /// Copies the selected history entry's text into the input buffer.
    RecallSelected,
    /// Hides the plugin pane.
    CloseFocus,

    /// Outcome of the host permission prompt.
    PermissionsResult {
        /// Whether web access was granted.
        granted: bool,
    },

    /// The host finished a classification request.
    ResponseSettled {
        /// Request id decoded from the request context.
        request_id: u64,
        /// HTTP status reported by the host.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
        /// Trace context of the issuing span, if it was propagated.
        trace_context: Option<TraceContext>,
    },
}

/// Processes an event, mutates application state, and returns actions.
///
/// Returns `(should_render, actions)`. Dispatch failures never surface here:
/// they are recorded in [`UiState::error`](crate::app::UiState) and the
/// diagnostic log by the dispatcher.
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return (false, vec![]);
            }
            if *c == '\t' {
                state.input.push_str(TAB_SPACES);
            } else {
                state.input.push(*c);
            }
            tracing::trace!(input_len = state.input.len(), char = %c, "input updated");
            (true, vec![])
        }
        Event::Newline => {
            if state.input_mode != InputMode::Editing {
                return (false, vec![]);
            }
            state.input.push('\n');
            (true, vec![])
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing {
                return (false, vec![]);
            }
            (state.input.pop().is_some(), vec![])
        }
        Event::ClearInput => {
            if state.input_mode != InputMode::Editing || state.input.is_empty() {
                return (false, vec![]);
            }
            state.input.clear();
            (true, vec![])
        }
        Event::Submit => match dispatcher::begin(state) {
            Some(pending) => (true, vec![Action::SendRequest(pending)]),
            // Rendering still matters when begin recorded an error.
            None => (state.ui().error.is_some(), vec![]),
        },
        Event::BrowseHistory => (enter_browsing(state), vec![]),
        Event::EditInput => {
            state.input_mode = InputMode::Editing;
            (true, vec![])
        }
        Event::KeyDown => {
            if state.input_mode == InputMode::Editing {
                return (enter_browsing(state), vec![]);
            }
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp => {
            if state.input_mode == InputMode::Editing {
                if !enter_browsing(state) {
                    return (false, vec![]);
                }
                // Moving up from the newest entry wraps to the oldest.
            }
            state.move_selection_up();
            (true, vec![])
        }
        Event::RecallSelected => {
            let Some(entry) = state.selected_entry() else {
                tracing::debug!("no history entry selected");
                return (false, vec![]);
            };
            state.input = entry.result.text.clone();
            state.input_mode = InputMode::Editing;
            tracing::debug!(index = state.selected_index, "recalled history entry into input");
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::PermissionsResult { granted } => {
            tracing::debug!(granted = granted, "web access permission result");
            state.web_access = *granted;
            (true, vec![])
        }
        Event::ResponseSettled {
            request_id,
            status,
            body,
            trace_context,
        } => {
            let applied =
                dispatcher::settle(state, *request_id, *status, body, trace_context.as_ref());
            (applied, vec![])
        }
    }
}

/// Inserted for a tab; the input frame measures text by `char` count.
const TAB_SPACES: &str = "    ";

/// Switches to browsing with the newest entry selected.
///
/// Returns `false` and stays in editing mode when the history is empty.
fn enter_browsing(state: &mut AppState) -> bool {
    if state.history().is_empty() {
        tracing::debug!("history is empty, staying in editing mode");
        return false;
    }
    state.input_mode = InputMode::Browsing;
    state.selected_index = 0;
    true
}

/// Short event name used as a span field; avoids logging typed text.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "Char",
        Event::Newline => "Newline",
        Event::Backspace => "Backspace",
        Event::ClearInput => "ClearInput",
        Event::Submit => "Submit",
        Event::BrowseHistory => "BrowseHistory",
        Event::EditInput => "EditInput",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::RecallSelected => "RecallSelected",
        Event::CloseFocus => "CloseFocus",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::ResponseSettled { .. } => "ResponseSettled",
    }
}
