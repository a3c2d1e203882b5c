//! Line measurement capability.
//!
//! The fitter never wraps text itself; it asks a [`LineMeasure`] how many
//! lines a candidate string occupies. Hosts bind one to their real layout
//! engine (font, width, paragraph spacing). Any `Fn(&str) -> usize` works:
//!
//! ```
//! use show_more::measure::LineMeasure;
//!
//! let six_per_line = |text: &str| text.chars().count().div_ceil(6);
//! assert_eq!(six_per_line.line_count("ABCDEFG"), 2);
//! ```
//!
//! [`CellWrap`] is a reference measurer that wraps at a fixed terminal-cell
//! width. It also implements [`LineBreaks`], which reports where each
//! rendered line starts and ends.

use std::ops::Range;

use crate::cells::{cell_len, get_character_cell_size};

/// Something that knows how many lines a string renders to.
///
/// Implementations must be deterministic: the same text always yields the
/// same count.
pub trait LineMeasure {
    /// Number of rendered lines for `text`.
    fn line_count(&self, text: &str) -> usize;
}

impl<F> LineMeasure for F
where
    F: Fn(&str) -> usize,
{
    fn line_count(&self, text: &str) -> usize {
        self(text)
    }
}

/// A measurer that can also report per-line character bounds.
pub trait LineBreaks: LineMeasure {
    /// Character ranges of each rendered line, contiguous and covering the
    /// whole text (trailing whitespace and hard newlines belong to the line
    /// they end).
    fn line_bounds(&self, text: &str) -> Vec<Range<usize>>;
}

/// Where [`CellWrap`] may break a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Break after whitespace when possible, inside a word otherwise.
    #[default]
    Word,
    /// Break at any character.
    Char,
}

/// Reference measurer wrapping at a fixed cell width.
///
/// - Hard newlines always start a new line; a trailing newline opens an
///   empty last line.
/// - In [`WrapMode::Word`], whitespace never causes a break: it hangs at the
///   end of the line, as most layout engines do.
/// - A character wider than the whole line gets a line of its own.
/// - Empty text occupies one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWrap {
    width: usize,
    mode: WrapMode,
    tab_size: usize,
}

impl CellWrap {
    /// Word-wrapping measurer for `width` cells (at least 1).
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            mode: WrapMode::Word,
            tab_size: 8,
        }
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn mode(mut self, mode: WrapMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the tab stop distance. Zero makes tabs zero-width.
    #[must_use]
    pub fn tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// The line width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    fn char_width(&self, c: char, column: usize) -> usize {
        if c == '\t' {
            if self.tab_size == 0 {
                0
            } else {
                self.tab_size - column % self.tab_size
            }
        } else {
            get_character_cell_size(c)
        }
    }

    /// Wrap one hard line (`chars[start..end]`, no newline inside).
    fn wrap_hard_line(&self, chars: &[char], start: usize, end: usize, out: &mut Vec<Range<usize>>) {
        let mut line_start = start;
        let mut width = 0;
        let mut last_space: Option<usize> = None;

        for i in start..end {
            let c = chars[i];
            let w = self.char_width(c, width);

            if self.mode == WrapMode::Word && c.is_whitespace() {
                width += w;
                last_space = Some(i);
                continue;
            }

            if width + w > self.width && i > line_start {
                match last_space {
                    Some(space) if self.mode == WrapMode::Word && space >= line_start => {
                        out.push(line_start..space + 1);
                        line_start = space + 1;
                        width = chars[line_start..i]
                            .iter()
                            .map(|&c| get_character_cell_size(c))
                            .sum();
                        // The carried-over word may itself leave no room.
                        if width + w > self.width && i > line_start {
                            out.push(line_start..i);
                            line_start = i;
                            width = 0;
                        }
                    }
                    _ => {
                        out.push(line_start..i);
                        line_start = i;
                        width = 0;
                    }
                }
                last_space = None;
            }

            width += w;
        }

        out.push(line_start..end);
    }
}

impl LineMeasure for CellWrap {
    fn line_count(&self, text: &str) -> usize {
        if !text.contains(['\n', '\t']) && cell_len(text) <= self.width {
            return 1;
        }
        self.line_bounds(text).len()
    }
}

impl LineBreaks for CellWrap {
    fn line_bounds(&self, text: &str) -> Vec<Range<usize>> {
        let chars: Vec<char> = text.chars().collect();
        let mut lines = Vec::new();
        let mut start = 0;

        for (i, &c) in chars.iter().enumerate() {
            if c == '\n' {
                self.wrap_hard_line(&chars, start, i, &mut lines);
                if let Some(last) = lines.last_mut() {
                    last.end = i + 1;
                }
                start = i + 1;
            }
        }
        self.wrap_hard_line(&chars, start, chars.len(), &mut lines);

        lines
    }
}

/// The text of the first `n` rendered lines.
///
/// Returns all of `text` when it has `n` lines or fewer.
#[must_use]
pub fn head_lines<'a, M: LineBreaks + ?Sized>(text: &'a str, measure: &M, n: usize) -> &'a str {
    if n == 0 {
        return "";
    }
    let bounds = measure.line_bounds(text);
    match bounds.get(n - 1) {
        Some(line) if n < bounds.len() => {
            let byte_end = text
                .char_indices()
                .nth(line.end)
                .map_or(text.len(), |(i, _)| i);
            &text[..byte_end]
        }
        _ => text,
    }
}
