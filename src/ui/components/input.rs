//! Input box component renderer.
//!
//! The box always occupies `INPUT_VISIBLE_LINES + 2` rows so the layout below
//! it does not jump while typing.

use crate::app::state::{BOX_MARGIN, INPUT_VISIBLE_LINES};
use crate::ui::helpers::{pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBoxInfo;

/// Renders the bordered input box at `row` and returns the row after it.
///
/// ```text
/// [margin] ┌─ Text ───────── 42 chars ─┐ [margin]
/// [margin] │ wrapped input line        │ [margin]
/// [margin] │ ...                       │ [margin]
/// [margin] └───────────────────────────┘ [margin]
/// ```
///
/// The frame uses `input_border` while focused and `border` otherwise. A
/// trailing block cursor is drawn after the last line while focused.
pub fn render_input_box(row: usize, input: &InputBoxInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let content_width = inner_width.saturating_sub(2);
    let frame = if input.is_focused {
        &theme.colors.input_border
    } else {
        &theme.colors.border
    };

    let title = "─ Text ";
    let count = format!(" {} chars ─", input.char_count);
    let fill = inner_width.saturating_sub(title.chars().count() + count.chars().count());

    position_cursor(row, 1);
    print!("{}", " ".repeat(BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("┌{title}{}{count}┐", "─".repeat(fill));
    print!("{}", Theme::reset());

    for offset in 0..INPUT_VISIBLE_LINES {
        let (text, color) = match (&input.placeholder, input.lines.get(offset)) {
            (Some(placeholder), _) if offset == 0 => (placeholder.clone(), &theme.colors.text_dim),
            (_, Some(line)) => {
                let is_last = offset + 1 == input.lines.len();
                let mut line = line.clone();
                if input.is_focused && is_last && line.chars().count() < content_width {
                    line.push('▏');
                }
                (line, &theme.colors.text_normal)
            }
            _ => (String::new(), &theme.colors.text_normal),
        };
        let text: String = text.chars().take(content_width).collect();

        position_cursor(row + 1 + offset, 1);
        print!("{}", " ".repeat(BOX_MARGIN));
        print!("{}│ ", Theme::fg(frame));
        print!("{}{}", Theme::fg(color), pad_right(&text, content_width));
        print!("{} │", Theme::fg(frame));
        print!("{}", Theme::reset());
    }

    position_cursor(row + 1 + INPUT_VISIBLE_LINES, 1);
    print!("{}", " ".repeat(BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + INPUT_VISIBLE_LINES + 2
}
