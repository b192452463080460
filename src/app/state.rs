//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. It holds the
//! input buffer, the current input mode, the history selection, and the
//! dispatcher-owned [`UiState`] and [`History`].
//!
//! # Ownership
//!
//! The input buffer and selection are edited by the event handler. `UiState`
//! and `History` are written only by the dispatcher; everything else reads
//! them through [`AppState::ui`] and [`AppState::history`].
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel) for a given pane size,
//! handling input wrapping, history windowing, and truncation.

use super::dispatcher::InFlight;
use super::history::History;
use super::modes::InputMode;
use super::validator::can_submit;
use crate::domain::{AnalysisResult, DispatchError, HistoryEntry};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, HistoryRow, InputBoxInfo, ResultPanel, StatusInfo,
    UIViewModel,
};

/// Number of wrapped input lines visible in the input box.
pub const INPUT_VISIBLE_LINES: usize = 3;

/// Horizontal margin on each side of the input box and confidence bar.
pub const BOX_MARGIN: usize = 2;

/// Width of the LABEL column in the history table.
pub const LABEL_COLUMN_WIDTH: usize = 10;

/// Width of the CONFIDENCE column in the history table.
pub const CONFIDENCE_COLUMN_WIDTH: usize = 12;

/// Width of the WHEN column in the history table.
pub const WHEN_COLUMN_WIDTH: usize = 10;

const PLACEHOLDER: &str = "Paste your news article or statement here...";

/// Request/result lifecycle state read by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Most recent successful result.
    pub current_result: Option<AnalysisResult>,

    /// `true` strictly between request issuance and its settlement.
    pub loading: bool,

    /// Failure of the last dispatch, cleared when a new one starts.
    pub error: Option<DispatchError>,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Text being composed. Sent verbatim on submit.
    pub input: String,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Zero-based index into the history, `0` being the newest entry.
    pub selected_index: usize,

    /// Classification endpoint URL.
    pub endpoint: String,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Whether the host granted the web-access permission.
    pub web_access: bool,

    pub(in crate::app) ui: UiState,
    pub(in crate::app) history: History,
    pub(in crate::app) in_flight: Option<InFlight>,
    pub(in crate::app) next_request_id: u64,
}

impl AppState {
    /// Creates an idle state with an empty buffer and history.
    ///
    /// `history_limit` of `None` keeps every entry for the session.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, theme: Theme, history_limit: Option<usize>) -> Self {
        Self {
            input: String::new(),
            input_mode: InputMode::Editing,
            selected_index: 0,
            endpoint: endpoint.into(),
            theme,
            web_access: false,
            ui: UiState::default(),
            history: History::new(history_limit),
            in_flight: None,
            next_request_id: 1,
        }
    }

    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Id of the request awaiting settlement, if any.
    #[must_use]
    pub fn in_flight_request_id(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.request_id)
    }

    /// Moves the history selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.history.len();
    }

    /// Moves the history selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.history.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.history.get(self.selected_index)
    }

    /// Keeps the same entry selected after a new one is prepended.
    pub(in crate::app) fn follow_history_growth(&mut self) {
        if self.input_mode == InputMode::Browsing && self.history.len() > 1 {
            self.selected_index += 1;
        }
        self.selected_index = self
            .selected_index
            .min(self.history.len().saturating_sub(1));
    }

    /// Computes a renderable view model for a `rows x cols` pane.
    ///
    /// `now` is the current unix time, used for relative timestamps.
    ///
    /// # Windowing
    ///
    /// The history table shows as many rows as fit after the fixed chrome.
    /// The window is centered on the selection and shifted to stay full near
    /// either end.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize, now: i64) -> UIViewModel {
        let result = self.compute_result_panel(cols);
        let error = self.ui.error.as_ref().map(|e| format!("Analysis failed: {e}"));

        let (history_rows, selected_index, empty_state) = if self.history.is_empty() {
            (
                vec![],
                0,
                Some(EmptyState {
                    message: "No analyses yet".to_string(),
                    subtitle: "Submitted texts and their verdicts will appear here".to_string(),
                }),
            )
        } else {
            let available = self.calculate_available_rows(rows, result.is_some(), error.is_some());
            let (start, end) = self.visible_window(available);
            let text_width = cols.saturating_sub(
                LABEL_COLUMN_WIDTH + CONFIDENCE_COLUMN_WIDTH + WHEN_COLUMN_WIDTH + 1,
            );

            let visible = self
                .history
                .iter()
                .enumerate()
                .skip(start)
                .take(end - start)
                .map(|(idx, entry)| self.compute_history_row(entry, idx, text_width, now))
                .collect();

            (visible, self.selected_index.saturating_sub(start), None)
        };

        UIViewModel {
            header: HeaderInfo {
                title: " Fake News Detector ".to_string(),
            },
            input: self.compute_input_box(cols),
            status: self.compute_status(),
            result,
            error,
            history_rows,
            selected_index,
            empty_state,
            footer: self.compute_footer(),
        }
    }

    fn compute_input_box(&self, cols: usize) -> InputBoxInfo {
        // Box borders plus one space of padding on each side.
        let inner_width = cols.saturating_sub(BOX_MARGIN * 2 + 4).max(1);
        let lines = wrap_tail(&self.input, inner_width, INPUT_VISIBLE_LINES);

        InputBoxInfo {
            placeholder: self.input.is_empty().then(|| PLACEHOLDER.to_string()),
            lines,
            is_focused: self.input_mode == InputMode::Editing,
            can_submit: can_submit(&self.input) && !self.ui.loading,
            char_count: self.input.chars().count(),
        }
    }

    fn compute_status(&self) -> StatusInfo {
        let message = if self.ui.loading {
            "Analyzing...".to_string()
        } else if !self.web_access {
            "Waiting for web access permission".to_string()
        } else if can_submit(&self.input) {
            "Press Enter to check authenticity".to_string()
        } else {
            "Enter some text to analyze".to_string()
        };

        StatusInfo {
            loading: self.ui.loading,
            message,
        }
    }

    fn compute_result_panel(&self, cols: usize) -> Option<ResultPanel> {
        let result = self.ui.current_result.as_ref()?;
        let bar_total = cols.saturating_sub(BOX_MARGIN * 2);

        // Truncation keeps the fill within the bar; the stored value is untouched.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let bar_filled = ((result.confidence_percent().max(0.0) / 100.0) * bar_total as f64)
            .round() as usize;

        Some(ResultPanel {
            prediction: result.prediction.clone(),
            confidence: result.confidence.clone(),
            verdict: result.verdict(),
            bar_filled: bar_filled.min(bar_total),
            bar_total,
            analysis: result.analysis.clone(),
        })
    }

    fn compute_history_row(
        &self,
        entry: &HistoryEntry,
        absolute_idx: usize,
        text_width: usize,
        now: i64,
    ) -> HistoryRow {
        HistoryRow {
            text: truncate_line(&entry.result.text, text_width),
            prediction: truncate_line(&entry.result.prediction, LABEL_COLUMN_WIDTH - 1),
            verdict: entry.result.verdict(),
            confidence: format!("{}%", entry.result.confidence),
            when: entry.time_ago(now),
            is_selected: self.input_mode == InputMode::Browsing
                && absolute_idx == self.selected_index,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Editing => {
                "Enter: analyze  Alt+Enter: newline  Ctrl+u: clear  Esc: history".to_string()
            }
            InputMode::Browsing => {
                "j/k or Ctrl+n/p: navigate  Enter: recall text  i/Esc: edit  q: quit".to_string()
            }
        };

        FooterInfo { keybindings }
    }

    /// Rows left for history entries after the fixed chrome.
    ///
    /// Chrome: blank line, header, border, input box (borders plus visible
    /// lines), status, border, table header, border, footer, and the last
    /// pane row, which the footer is pinned above. The result panel adds 3
    /// rows, the error line 1.
    const fn calculate_available_rows(
        &self,
        total_rows: usize,
        has_result: bool,
        has_error: bool,
    ) -> usize {
        let mut chrome = 3 + (INPUT_VISIBLE_LINES + 2) + 1 + 5;
        if has_result {
            chrome += 3;
        }
        if has_error {
            chrome += 1;
        }
        total_rows.saturating_sub(chrome)
    }

    /// Returns the `[start, end)` range of history indices to display.
    fn visible_window(&self, available_rows: usize) -> (usize, usize) {
        let len = self.history.len();
        let selected = if self.input_mode == InputMode::Browsing {
            self.selected_index
        } else {
            0
        };

        let mut start = selected.saturating_sub(available_rows / 2);
        let end = (start + available_rows).min(len);

        if end - start < available_rows && len >= available_rows {
            start = end.saturating_sub(available_rows);
        }

        (start, end)
    }
}

/// Flattens whitespace runs (including newlines) and truncates to `max_chars`
/// characters, ending with "..." when shortened.
#[must_use]
pub fn truncate_line(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if flat.chars().count() <= max_chars {
        return flat;
    }
    if max_chars <= 3 {
        return flat.chars().take(max_chars).collect();
    }

    let mut truncated: String = flat.chars().take(max_chars - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Wraps `text` to `width` characters per line, honoring explicit newlines,
/// and returns the last `max_lines` lines.
#[must_use]
pub fn wrap_tail(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if text.is_empty() || width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let chars: Vec<char> = raw_line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            lines.push(chunk.iter().collect());
        }
    }

    let skip = lines.len().saturating_sub(max_lines);
    lines.split_off(skip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawAnalysisResponse;

    fn state_with_history(count: usize) -> AppState {
        let mut state = AppState::new("http://localhost/predict", Theme::default(), None);
        for i in 0..count {
            let result = AnalysisResult::from_response(
                format!("entry {i}"),
                RawAnalysisResponse {
                    label: Some(if i % 2 == 0 { "Real" } else { "Fake" }.to_string()),
                    confidence: Some(0.75),
                    note: None,
                },
            );
            state.history.push_entry(HistoryEntry {
                result,
                recorded_at: 0,
            });
        }
        state
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = state_with_history(3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_is_noop_on_empty_history() {
        let mut state = state_with_history(0);
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_entry().is_none());
    }

    #[test]
    fn empty_history_shows_empty_state() {
        let state = state_with_history(0);
        let vm = state.compute_viewmodel(40, 80, 0);
        assert!(vm.history_rows.is_empty());
        assert!(vm.empty_state.is_some());
        assert_eq!(vm.input.placeholder.as_deref(), Some(PLACEHOLDER));
        assert!(!vm.input.can_submit);
    }

    #[test]
    fn history_window_follows_selection() {
        let mut state = state_with_history(30);
        state.input_mode = InputMode::Browsing;
        state.selected_index = 29;

        // 24 rows minus 14 rows of chrome leaves 10 history rows.
        let vm = state.compute_viewmodel(24, 80, 0);
        assert_eq!(vm.history_rows.len(), 10);
        assert!(vm.history_rows[vm.selected_index].is_selected);
        assert_eq!(vm.history_rows[vm.selected_index].text, "entry 0");
    }

    /// First history row for a layout: blank, header, border, input box,
    /// status, optional result panel and error line, border, table header.
    fn first_history_row(has_result: bool, has_error: bool) -> usize {
        let mut row = 4 + INPUT_VISIBLE_LINES + 2 + 1 + 2;
        if has_result {
            row += 3;
        }
        if has_error {
            row += 1;
        }
        row
    }

    #[test]
    fn oldest_selected_row_stays_above_bottom_border() {
        let rows = 24;
        let border_row = rows - 2;

        let mut state = state_with_history(30);
        state.input_mode = InputMode::Browsing;
        state.move_selection_up();
        assert_eq!(state.selected_index, 29);

        let vm = state.compute_viewmodel(rows, 80, 0);
        let last_row = first_history_row(false, false) + vm.history_rows.len() - 1;
        assert!(last_row < border_row);
        assert_eq!(vm.selected_index, vm.history_rows.len() - 1);

        state.ui.current_result = state.history.get(0).map(|e| e.result.clone());
        state.ui.error = Some(DispatchError::TransportFailure {
            reason: "x".to_string(),
        });
        let vm = state.compute_viewmodel(rows, 80, 0);
        let last_row = first_history_row(true, true) + vm.history_rows.len() - 1;
        assert!(last_row < border_row);
        assert!(vm.history_rows[vm.selected_index].is_selected);
    }

    #[test]
    fn result_panel_bar_is_proportional() {
        let mut state = state_with_history(0);
        state.ui.current_result = Some(AnalysisResult::from_response(
            "x".to_string(),
            RawAnalysisResponse {
                label: Some("Real".to_string()),
                confidence: Some(0.5),
                note: None,
            },
        ));

        let vm = state.compute_viewmodel(40, 84, 0);
        let panel = vm.result.unwrap();
        assert_eq!(panel.bar_total, 80);
        assert_eq!(panel.bar_filled, 40);
        assert_eq!(panel.confidence, "50.00");
    }

    #[test]
    fn error_is_rendered_as_message() {
        let mut state = state_with_history(0);
        state.ui.error = Some(DispatchError::RequestFailure {
            status: 500,
            body: "oops".to_string(),
        });
        let vm = state.compute_viewmodel(40, 80, 0);
        assert_eq!(vm.error.as_deref(), Some("Analysis failed: HTTP 500: oops"));
    }

    #[test]
    fn truncate_line_is_char_safe() {
        assert_eq!(truncate_line("héllo wörld", 8), "héllo...");
        assert_eq!(truncate_line("line one\nline two", 40), "line one line two");
        assert_eq!(truncate_line("abcdef", 2), "ab");
    }

    #[test]
    fn wrap_tail_keeps_last_lines() {
        let lines = wrap_tail("abcdefgh\n\nxyz", 3, 3);
        assert_eq!(lines, ["gh", "", "xyz"]);
        assert!(wrap_tail("", 10, 3).is_empty());
    }
}
