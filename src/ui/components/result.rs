//! Status line, result panel, and error line renderers.

use crate::app::state::BOX_MARGIN;
use crate::ui::helpers::{pad_right, position_cursor, verdict_marker};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultPanel, StatusInfo};

const DISCLAIMER: &str =
    "Note: machine learning output is a guide. Verify with multiple credible sources.";

/// Renders the one-line status under the input box.
pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    let color = if status.loading {
        &theme.colors.input_border
    } else {
        &theme.colors.text_dim
    };
    let marker = if status.loading { "⟳ " } else { "" };
    let text = format!("{}{marker}{}", " ".repeat(BOX_MARGIN), status.message);

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", pad_right(&text, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the latest prediction in three rows and returns the row after it.
///
/// ```text
///   ✓ Prediction: Real    Confidence: 87.32%
///   ██████████████████████░░░░░░
///   <analysis, or the disclaimer when the backend sent none>
/// ```
pub fn render_result_panel(row: usize, panel: &ResultPanel, theme: &Theme, cols: usize) -> usize {
    let color = theme.colors.verdict(panel.verdict);
    let margin = " ".repeat(BOX_MARGIN);

    let summary = format!(
        "{} Prediction: {}    Confidence: {}%",
        verdict_marker(panel.verdict),
        panel.prediction,
        panel.confidence
    );
    position_cursor(row, 1);
    print!("{margin}{}{}", Theme::bold(), Theme::fg(color));
    print!("{}", pad_right(&summary, cols.saturating_sub(BOX_MARGIN)));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{margin}{}", Theme::fg(color));
    print!("{}", "█".repeat(panel.bar_filled));
    print!("{}", Theme::fg(&theme.colors.bar_track));
    print!("{}", "░".repeat(panel.bar_total.saturating_sub(panel.bar_filled)));
    print!("{}", Theme::reset());

    let note = panel.analysis.as_deref().unwrap_or(DISCLAIMER);
    let note: String = note.chars().take(cols.saturating_sub(BOX_MARGIN)).collect();
    position_cursor(row + 2, 1);
    print!("{margin}{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("{}", pad_right(&note, cols.saturating_sub(BOX_MARGIN)));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders the last dispatch failure on one line.
pub fn render_error(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    let text: String = format!("{}✗ {message}", " ".repeat(BOX_MARGIN))
        .chars()
        .take(cols)
        .collect();

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{}", pad_right(&text, cols));
    print!("{}", Theme::reset());
    row + 1
}
