//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! strings are already truncated and wrapped to the pane width.

use crate::domain::Verdict;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub input: InputBoxInfo,

    /// One-line status under the input box.
    pub status: StatusInfo,

    /// Latest result, if any analysis has succeeded.
    pub result: Option<ResultPanel>,

    /// Message of the last failed dispatch, cleared by the next submission.
    pub error: Option<String>,

    /// Visible window of history rows, newest first.
    pub history_rows: Vec<HistoryRow>,

    /// Index of the selected row within `history_rows`.
    pub selected_index: usize,

    /// Shown in place of the history table when no analyses exist yet.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Input box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBoxInfo {
    /// Tail of the input buffer, wrapped to the box width.
    pub lines: Vec<String>,

    /// Placeholder shown when the buffer is empty.
    pub placeholder: Option<String>,

    /// Whether keystrokes currently edit the buffer.
    pub is_focused: bool,

    /// Whether Enter would submit (see [`can_submit`](crate::app::can_submit)).
    pub can_submit: bool,

    /// Character count of the whole buffer.
    pub char_count: usize,
}

/// Status line under the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub loading: bool,
    pub message: String,
}

/// Latest prediction with its confidence bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub prediction: String,
    /// Percentage string with two decimals, without the `%` sign.
    pub confidence: String,
    pub verdict: Verdict,
    /// Filled cells of the confidence bar, clamped to `bar_total`.
    pub bar_filled: usize,
    pub bar_total: usize,
    pub analysis: Option<String>,
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// Submitted text, flattened to one line and truncated.
    pub text: String,
    pub prediction: String,
    pub verdict: Verdict,
    pub confidence: String,
    /// Relative settlement time, e.g. "5m ago".
    pub when: String,
    pub is_selected: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
