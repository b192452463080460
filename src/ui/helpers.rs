//! Shared rendering utilities.
//!
//! Every component positions the cursor itself and pads its lines to the pane
//! width, so a frame fully overwrites the previous one.

use crate::domain::Verdict;

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Pads `text` with trailing spaces to `width` characters.
///
/// Counts characters, not bytes, so multi-byte glyphs line up. Text already
/// wider than `width` is returned unchanged.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Left padding that centers `len` characters in `width` columns.
#[must_use]
pub const fn center_offset(len: usize, width: usize) -> usize {
    width.saturating_sub(len) / 2
}

/// Single-glyph marker shown next to a verdict.
#[must_use]
pub const fn verdict_marker(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Real => "✓",
        Verdict::Fake => "✗",
        Verdict::Unknown => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_right_counts_chars() {
        assert_eq!(pad_right("✓ ok", 6), "✓ ok  ");
        assert_eq!(pad_right("longer", 3), "longer");
    }

    #[test]
    fn center_offset_favors_left_on_odd_remainder() {
        assert_eq!(center_offset(4, 10), 3);
        assert_eq!(center_offset(5, 10), 2);
        assert_eq!(center_offset(20, 10), 0);
    }

    #[test]
    fn every_verdict_has_a_marker() {
        assert_eq!(verdict_marker(Verdict::Real), "✓");
        assert_eq!(verdict_marker(Verdict::Fake), "✗");
        assert_eq!(verdict_marker(Verdict::Unknown), "?");
    }
}
