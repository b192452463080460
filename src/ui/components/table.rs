//! History table renderer.
//!
//! Four columns: TEXT (flexible), LABEL, CONFIDENCE, WHEN. The view model has
//! already truncated every cell, so this module only pads and colors.

use crate::app::state::{CONFIDENCE_COLUMN_WIDTH, LABEL_COLUMN_WIDTH, WHEN_COLUMN_WIDTH};
use crate::ui::helpers::{pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HistoryRow;

fn text_column_width(cols: usize) -> usize {
    cols.saturating_sub(LABEL_COLUMN_WIDTH + CONFIDENCE_COLUMN_WIDTH + WHEN_COLUMN_WIDTH)
}

/// Renders the bold column headers at `row`.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad_right("TEXT", text_column_width(cols)));
    print!("{}", pad_right("LABEL", LABEL_COLUMN_WIDTH));
    print!("{}", pad_right("CONFIDENCE", CONFIDENCE_COLUMN_WIDTH));
    print!("{}", pad_right("WHEN", WHEN_COLUMN_WIDTH));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders rows from `row` up to, but not including, `limit_row` and returns
/// the row after the last one drawn.
pub fn render_table_rows(
    row: usize,
    limit_row: usize,
    items: &[HistoryRow],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        if current_row >= limit_row {
            break;
        }
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single history row.
///
/// A selected row takes the selection colors across the full width; other
/// rows color the LABEL cell by verdict.
fn render_table_row(row: usize, item: &HistoryRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    print!("{base}");
    print!("{}", pad_right(&item.text, text_column_width(cols)));

    if !item.is_selected {
        print!("{}", Theme::fg(theme.colors.verdict(item.verdict)));
    }
    print!("{}", pad_right(&item.prediction, LABEL_COLUMN_WIDTH));
    print!("{base}");

    print!("{}", pad_right(&item.confidence, CONFIDENCE_COLUMN_WIDTH));
    print!("{}", pad_right(&item.when, WHEN_COLUMN_WIDTH));

    print!("{}", Theme::reset());
    row + 1
}
