//! Composable UI component renderers.
//!
//! Each component prints one section of the pane at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: title bar
//! - [`input`]: bordered input box with character count
//! - [`result`]: status line, latest prediction with confidence bar, error line
//! - [`table`]: history table (TEXT, LABEL, CONFIDENCE, WHEN)
//! - [`empty`]: placeholder shown until the first analysis settles
//! - [`footer`]: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Input box]
//! [Status]
//! [Result panel, 3 rows]   (once an analysis succeeded)
//! [Error line]             (after a failed dispatch)
//! [Border]
//! [Table headers]
//! [History rows or empty state]
//! [Blank padding]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod input;
mod result;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use input::render_input_box;
use result::{render_error, render_result_panel, render_status};
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout. The footer is pinned to the last row.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_input_box(current_row, &vm.input, theme, cols);
    current_row = render_status(current_row, &vm.status, theme, cols);

    if let Some(panel) = &vm.result {
        current_row = render_result_panel(current_row, panel, theme, cols);
    }
    if let Some(message) = &vm.error {
        current_row = render_error(current_row, message, theme, cols);
    }

    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_table_headers(current_row, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    if let Some(empty) = &vm.empty_state {
        // Too short a pane keeps the empty state from overwriting the footer.
        if current_row + 3 <= border_row {
            render_empty_state(current_row, empty, theme, cols);
        }
    } else {
        render_table_rows(current_row, border_row, &vm.history_rows, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
