//! Text with styled spans.
//!
//! `Text` is the style-range model shared by the fitter and the merger: a
//! plain string plus an ordered list of [`Span`]s. Spans use character
//! indices, may overlap, and are kept in the order they were added.

use std::fmt;
use std::ops::{Add, AddAssign};

use crate::cells::cell_len;
use crate::style::Style;

/// How a span reacts to text inserted exactly at its edges.
///
/// Mirrors the span flags of common text-layout toolkits. An inclusive end
/// also makes the span's end offset count as a hit for
/// [`Span::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpanBoundary {
    /// Neither edge grows.
    #[default]
    ExclusiveExclusive,
    /// Text inserted at the end joins the span.
    ExclusiveInclusive,
    /// Text inserted at the start joins the span.
    InclusiveExclusive,
    /// Text inserted at either edge joins the span.
    InclusiveInclusive,
}

impl SpanBoundary {
    /// Whether insertions at the start offset extend the span.
    #[must_use]
    pub const fn start_inclusive(self) -> bool {
        matches!(self, Self::InclusiveExclusive | Self::InclusiveInclusive)
    }

    /// Whether insertions at the end offset extend the span.
    #[must_use]
    pub const fn end_inclusive(self) -> bool {
        matches!(self, Self::ExclusiveInclusive | Self::InclusiveInclusive)
    }
}

/// A span of styled text.
///
/// `[start, end)` in character (not byte) indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start character index (inclusive).
    pub start: usize,
    /// End character index (exclusive).
    pub end: usize,
    /// Style to apply to this span.
    pub style: Style,
    /// Edge behaviour.
    pub boundary: SpanBoundary,
}

impl Span {
    /// Create a new span with exclusive edges.
    #[must_use]
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self::with_boundary(start, end, style, SpanBoundary::default())
    }

    /// Create a new span with explicit edge behaviour.
    #[must_use]
    pub fn with_boundary(start: usize, end: usize, style: Style, boundary: SpanBoundary) -> Self {
        Self {
            start: start.min(end),
            end: end.max(start),
            style,
            boundary,
        }
    }

    /// Check if this span is empty (zero length).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Get the length of this span in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Shift the span right by `offset` characters.
    #[must_use]
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            style: self.style.clone(),
            boundary: self.boundary,
        }
    }

    /// Hit-test a character offset.
    ///
    /// An inclusive end accepts `offset == end`.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset
            && (offset < self.end || (self.boundary.end_inclusive() && offset == self.end))
    }
}

/// Text with styled spans.
#[derive(Debug, Clone, Default)]
pub struct Text {
    /// Plain text content.
    plain: String,
    /// Style spans (character indices).
    spans: Vec<Span>,
    /// Cached character length.
    length: usize,
}

impl Text {
    /// Create a new Text from plain text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let plain: String = text.into();
        let length = plain.chars().count();
        Self {
            plain,
            spans: Vec::new(),
            length,
        }
    }

    /// Create a Text styled from end to end.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut text = Self::new(text);
        text.stylize_all(style);
        text
    }

    /// Get the plain text content.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Get the spans.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Get the character length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// Get the cell width.
    #[must_use]
    pub fn cell_len(&self) -> usize {
        cell_len(&self.plain)
    }

    /// Byte offset of a character index, clamped to the end of the text.
    #[must_use]
    pub fn char_to_byte(&self, index: usize) -> usize {
        self.plain
            .char_indices()
            .nth(index)
            .map_or(self.plain.len(), |(i, _)| i)
    }

    /// Insert plain text at a character offset.
    ///
    /// Spans after the insertion point move right. A span whose edge sits
    /// exactly at the insertion point grows only if that edge is inclusive.
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.length);
        let inserted = text.chars().count();
        if inserted == 0 {
            return;
        }
        let byte = self.char_to_byte(offset);
        self.plain.insert_str(byte, text);
        self.length += inserted;

        for span in &mut self.spans {
            let grows_at_start = span.start == offset && span.boundary.start_inclusive();
            if span.start > offset || (span.start == offset && !grows_at_start) {
                span.start += inserted;
            }
            if span.end > offset || (span.end == offset && span.boundary.end_inclusive()) {
                span.end += inserted;
            }
            if span.start > span.end {
                span.start = span.end;
            }
        }
    }

    /// Append plain text.
    pub fn append(&mut self, text: &str) {
        self.insert(self.length, text);
    }

    /// Append styled text.
    pub fn append_styled(&mut self, text: &str, style: Style) {
        let start = self.length;
        self.append(text);
        self.stylize(start, self.length, style);
    }

    /// Append another Text object, carrying its spans.
    pub fn append_text(&mut self, other: &Text) {
        let offset = self.length;
        self.plain.push_str(&other.plain);
        self.length += other.length;
        self.spans
            .extend(other.spans.iter().map(|span| span.shifted(offset)));
    }

    /// Apply a style to a character range.
    pub fn stylize(&mut self, start: usize, end: usize, style: Style) {
        self.stylize_with(start, end, style, SpanBoundary::default());
    }

    /// Apply a style to a character range with explicit edge behaviour.
    ///
    /// The range is clamped to the text; empty ranges are ignored.
    pub fn stylize_with(&mut self, start: usize, end: usize, style: Style, boundary: SpanBoundary) {
        let clamped_start = start.min(self.length);
        let clamped_end = end.min(self.length);
        if clamped_start < clamped_end {
            self.spans
                .push(Span::with_boundary(clamped_start, clamped_end, style, boundary));
        }
    }

    /// Apply style to entire text.
    pub fn stylize_all(&mut self, style: Style) {
        self.stylize(0, self.length, style);
    }

    /// Spans covering a character offset, in insertion order.
    pub fn spans_at(&self, offset: usize) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |span| span.contains(offset))
    }

    /// Get a slice of the text as a new Text object.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let clamped_start = start.min(self.length);
        let clamped_end = end.min(self.length).max(clamped_start);

        if clamped_start >= clamped_end {
            return Self::new("");
        }

        let byte_start = self.char_to_byte(clamped_start);
        let byte_end = self.char_to_byte(clamped_end);

        let spans = self
            .spans
            .iter()
            .filter(|span| span.end > clamped_start && span.start < clamped_end)
            .map(|span| Span {
                start: span.start.max(clamped_start) - clamped_start,
                end: span.end.min(clamped_end) - clamped_start,
                style: span.style.clone(),
                boundary: span.boundary,
            })
            .filter(|span| !span.is_empty())
            .collect();

        Self {
            plain: self.plain[byte_start..byte_end].to_string(),
            spans,
            length: clamped_end - clamped_start,
        }
    }

    /// Prepend plain text, shifting every span. See [`crate::merge::merge`].
    #[must_use]
    pub fn prepend(&self, prefix: &str) -> Self {
        crate::merge::merge(prefix, self)
    }

    /// Build directly from parts. Spans must already lie within the text.
    pub(crate) fn from_parts(plain: String, spans: Vec<Span>) -> Self {
        let length = plain.chars().count();
        debug_assert!(spans.iter().all(|span| span.end <= length));
        Self {
            plain,
            spans,
            length,
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain)
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.plain == other.plain && self.spans == other.spans
    }
}

impl Eq for Text {}

impl Add for Text {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.append_text(&rhs);
        self
    }
}

impl AddAssign for Text {
    fn add_assign(&mut self, rhs: Self) {
        self.append_text(&rhs);
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_new() {
        let text = Text::new("hello");
        assert_eq!(text.plain(), "hello");
        assert_eq!(text.len(), 5);
        assert!(!text.is_empty());
    }

    #[test]
    fn test_text_styled() {
        let text = Text::styled("hello", Style::new().bold());
        assert_eq!(text.spans().len(), 1);
        assert_eq!(text.spans()[0].start, 0);
        assert_eq!(text.spans()[0].end, 5);
    }

    #[test]
    fn test_text_styled_empty() {
        let text = Text::styled("", Style::new().bold());
        assert!(text.is_empty());
        assert!(text.spans().is_empty());
    }

    #[test]
    fn test_text_append_styled() {
        let mut text = Text::new("hello ");
        text.append_styled("world", Style::new().bold());
        assert_eq!(text.plain(), "hello world");
        assert_eq!(text.spans().len(), 1);
        assert_eq!(text.spans()[0].start, 6);
        assert_eq!(text.spans()[0].end, 11);
    }

    #[test]
    fn test_append_respects_exclusive_end() {
        let mut text = Text::styled("more", Style::new().bold());
        text.append("!");
        assert_eq!(text.spans()[0].end, 4);
    }

    #[test]
    fn test_append_grows_inclusive_end() {
        let mut text = Text::new("more");
        text.stylize_with(0, 4, Style::new().bold(), SpanBoundary::ExclusiveInclusive);
        text.append("!!");
        assert_eq!(text.plain(), "more!!");
        assert_eq!(text.spans()[0].end, 6);
    }

    #[test]
    fn test_insert_at_start_edges() {
        let mut text = Text::new("ab");
        text.stylize_with(0, 2, Style::new().bold(), SpanBoundary::InclusiveExclusive);
        text.stylize_with(0, 2, Style::new().italic(), SpanBoundary::ExclusiveExclusive);
        text.insert(0, "xy");
        assert_eq!(text.plain(), "xyab");
        assert_eq!((text.spans()[0].start, text.spans()[0].end), (0, 4));
        assert_eq!((text.spans()[1].start, text.spans()[1].end), (2, 4));
    }

    #[test]
    fn test_insert_inside_span_grows_it() {
        let mut text = Text::styled("abcd", Style::new().bold());
        text.insert(2, "中");
        assert_eq!(text.plain(), "ab中cd");
        assert_eq!((text.spans()[0].start, text.spans()[0].end), (0, 5));
    }

    #[test]
    fn test_text_slice() {
        let mut text = Text::new("hello world");
        text.stylize(0, 5, Style::new().bold());
        text.stylize(6, 11, Style::new().italic());

        let slice = text.slice(3, 8);
        assert_eq!(slice.plain(), "lo wo");
        assert_eq!(slice.len(), 5);
        assert_eq!(slice.spans().len(), 2);
        assert_eq!((slice.spans()[0].start, slice.spans()[0].end), (0, 2));
        assert_eq!((slice.spans()[1].start, slice.spans()[1].end), (3, 5));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let text = Text::new("abc");
        assert_eq!(text.slice(2, 10).plain(), "c");
        assert!(text.slice(5, 10).is_empty());
        assert!(text.slice(2, 1).is_empty());
    }

    #[test]
    fn test_char_to_byte_multibyte() {
        let text = Text::new("全文ok");
        assert_eq!(text.char_to_byte(0), 0);
        assert_eq!(text.char_to_byte(2), 6);
        assert_eq!(text.char_to_byte(9), text.plain().len());
    }

    #[test]
    fn test_stylize_clamps() {
        let mut text = Text::new("abc");
        text.stylize(1, 99, Style::new().bold());
        text.stylize(5, 9, Style::new().italic());
        assert_eq!(text.spans().len(), 1);
        assert_eq!(text.spans()[0].end, 3);
    }

    #[test]
    fn test_overlapping_spans_kept_in_order() {
        let mut text = Text::new("hello world");
        text.stylize(0, 11, Style::new().bold());
        text.stylize(2, 9, Style::new().italic());
        let hits: Vec<_> = text.spans_at(4).collect();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].style.attributes.contains(crate::style::Attributes::BOLD));
    }

    #[test]
    fn test_span_contains_honours_end_flag() {
        let exclusive = Span::new(2, 4, Style::null());
        let inclusive =
            Span::with_boundary(2, 4, Style::null(), SpanBoundary::ExclusiveInclusive);
        assert!(!exclusive.contains(1));
        assert!(exclusive.contains(2));
        assert!(!exclusive.contains(4));
        assert!(inclusive.contains(4));
        assert!(!inclusive.contains(5));
    }

    #[test]
    fn test_span_new_swaps_if_needed() {
        let span = Span::new(5, 2, Style::null());
        assert_eq!((span.start, span.end), (2, 5));
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_text_add() {
        let a = Text::new("hello ");
        let b = Text::styled("world", Style::new().bold());
        let combined = a + b;
        assert_eq!(combined.plain(), "hello world");
        assert_eq!(combined.spans()[0].start, 6);
    }

    #[test]
    fn test_text_equality_includes_spans() {
        let plain = Text::new("abc");
        let styled = Text::styled("abc", Style::new().bold());
        assert_ne!(plain, styled);
        assert_eq!(plain, Text::from("abc"));
    }
}
