//! Submission gate.

/// Returns `true` iff `text` contains something other than whitespace.
///
/// Pure; used by the view to hint whether Enter will submit and by the
/// dispatcher as its first guard.
///
/// # Examples
///
/// ```
/// use truthlens::app::can_submit;
///
/// assert!(can_submit("  breaking news "));
/// assert!(!can_submit(" \n\t "));
/// ```
#[must_use]
pub fn can_submit(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::can_submit;

    #[test]
    fn blank_text_cannot_be_submitted() {
        assert!(!can_submit(""));
        assert!(!can_submit("   "));
        assert!(!can_submit("\n\t\r\n"));
        assert!(!can_submit("\u{3000}"));
    }

    #[test]
    fn any_visible_character_is_enough() {
        assert!(can_submit("a"));
        assert!(can_submit("\n  x  \n"));
    }
}
