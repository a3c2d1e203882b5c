//! Terminal cell widths.
//!
//! Wide East Asian characters take two cells; combining marks and control
//! characters take none.

use unicode_width::UnicodeWidthChar;

/// Cells occupied by `c`.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cells occupied by `text`, ignoring tabs and line breaks.
#[must_use]
pub fn cell_len(text: &str) -> usize {
    text.chars().map(get_character_cell_size).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow() {
        assert_eq!(cell_len("... more"), 8);
        assert_eq!(get_character_cell_size('a'), 1);
    }

    #[test]
    fn test_wide_label() {
        assert_eq!(get_character_cell_size('全'), 2);
        assert_eq!(cell_len("...   全文"), 10);
    }

    #[test]
    fn test_combining_mark_is_free() {
        assert_eq!(get_character_cell_size('\u{301}'), 0);
        assert_eq!(cell_len("cafe\u{301}"), 4);
    }

    #[test]
    fn test_empty() {
        assert_eq!(cell_len(""), 0);
    }
}
