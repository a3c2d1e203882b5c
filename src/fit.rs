//! Fitting long text into a fixed number of lines.
//!
//! Given the full text, a [`LineMeasure`] bound to the display's width and
//! font, and a [`FitConfig`], the fitter finds the longest prefix such that
//! `prefix + ellipsis + spacer + label` renders within `max_lines`, and
//! marks the trailing label with the configured action style.
//!
//! ```
//! use show_more::fit::{FitConfig, LineFitter};
//! use show_more::measure::{CellWrap, WrapMode};
//!
//! let config = FitConfig::new(1).ellipsis("...").spacer_width(1).action_label("more");
//! let fitter = LineFitter::new(CellWrap::new(12).mode(WrapMode::Char), config);
//!
//! let text = fitter.fit("ABCDEFGHIJKLMNOPQRST").unwrap();
//! assert_eq!(text.plain(), "ABCD... more");
//! assert!(text.spans().iter().all(|span| (span.start, span.end) == (8, 12)));
//! ```
//!
//! The default [`ShrinkStrategy::Linear`] drops one unit at a time from the
//! end of the prefix and re-measures, so it needs one measurement per
//! dropped unit. [`ShrinkStrategy::Bisect`] needs O(log n) but is only
//! correct when the measurer's line count never decreases as the prefix
//! grows.

use unicode_segmentation::UnicodeSegmentation;

use crate::color::Color;
use crate::error::{ConfigError, Result, ShowMoreError};
use crate::measure::{LineBreaks, LineMeasure};
use crate::style::{Action, Style};
use crate::text::{SpanBoundary, Text};

/// How the prefix is shortened while searching for a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShrinkStrategy {
    /// Drop one unit at a time from the end.
    #[default]
    Linear,
    /// Binary search over prefix length.
    ///
    /// Assumes the line count of `prefix + suffix` never decreases as the
    /// prefix grows. Measurers that break that may get a shorter prefix than
    /// [`ShrinkStrategy::Linear`] would find. Word wrapping is one: a
    /// prefix ending in a space lets the suffix break earlier.
    Bisect,
}

/// The unit removed from the prefix per shrink step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimUnit {
    /// One Unicode scalar value.
    #[default]
    Char,
    /// One extended grapheme cluster; never splits a base character from
    /// its combining marks.
    Grapheme,
}

/// Fitting parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitConfig {
    /// Maximum number of rendered lines.
    pub max_lines: usize,
    /// Text placed right after the kept prefix.
    pub ellipsis: String,
    /// Number of spaces between the ellipsis and the label.
    pub spacer_width: usize,
    /// The activatable label.
    pub action_label: String,
    /// Style of the label range.
    pub action_style: Style,
    /// Edge behaviour of the label ranges.
    pub boundary: SpanBoundary,
    /// Shrink strategy.
    pub strategy: ShrinkStrategy,
    /// Shrink unit.
    pub trim: TrimUnit,
    /// Whether an expanded display drops the line limit entirely.
    pub unlimited_on_expand: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_lines: 3,
            ellipsis: "...".to_string(),
            spacer_width: 3,
            action_label: "全文".to_string(),
            action_style: Style::new().color(Color::from_ansi(1)).action(Action::Expand),
            boundary: SpanBoundary::ExclusiveInclusive,
            strategy: ShrinkStrategy::Linear,
            trim: TrimUnit::Char,
            unlimited_on_expand: true,
        }
    }
}

impl FitConfig {
    /// Default configuration with a different line limit.
    #[must_use]
    pub fn new(max_lines: usize) -> Self {
        Self {
            max_lines,
            ..Self::default()
        }
    }

    /// Set the line limit.
    #[must_use]
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set the ellipsis.
    #[must_use]
    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Set the number of spaces between ellipsis and label.
    #[must_use]
    pub fn spacer_width(mut self, spacer_width: usize) -> Self {
        self.spacer_width = spacer_width;
        self
    }

    /// Set the label.
    #[must_use]
    pub fn action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = label.into();
        self
    }

    /// Set the label style.
    #[must_use]
    pub fn action_style(mut self, style: Style) -> Self {
        self.action_style = style;
        self
    }

    /// Set the label style from a style string such as `"bold red expand"`.
    ///
    /// # Errors
    ///
    /// Returns [`ShowMoreError::Style`] if the string does not parse.
    pub fn action_style_str(self, style: &str) -> Result<Self> {
        Ok(self.action_style(Style::parse(style)?))
    }

    /// Set the edge behaviour of the label ranges.
    #[must_use]
    pub fn boundary(mut self, boundary: SpanBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the shrink strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: ShrinkStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the shrink unit.
    #[must_use]
    pub fn trim(mut self, trim: TrimUnit) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether expanding lifts the line limit.
    #[must_use]
    pub fn unlimited_on_expand(mut self, unlimited: bool) -> Self {
        self.unlimited_on_expand = unlimited;
        self
    }

    /// `ellipsis ++ spaces ++ label`.
    #[must_use]
    pub fn suffix(&self) -> String {
        let mut suffix = String::with_capacity(
            self.ellipsis.len() + self.spacer_width + self.action_label.len(),
        );
        suffix.push_str(&self.ellipsis);
        suffix.extend(std::iter::repeat_n(' ', self.spacer_width));
        suffix.push_str(&self.action_label);
        suffix
    }

    /// Check the configuration can be fitted at all.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxLines`] when `max_lines` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroMaxLines.into());
        }
        Ok(())
    }

    /// Attach the label ranges over the last label characters of `text`.
    fn style_label(&self, text: &mut Text) {
        let end = text.len();
        let start = end - self.action_label.chars().count();
        let (visual, action) = self.action_style.split_action();
        if !visual.is_null() || action.is_none() {
            text.stylize_with(start, end, visual, self.boundary);
        }
        if let Some(action) = action {
            text.stylize_with(start, end, Style::new().action(action), self.boundary);
        }
    }
}

/// Outcome of a fit, with bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fitted {
    /// Text ready for display.
    pub text: Text,
    /// Characters of the original text that were kept.
    pub prefix_len: usize,
    /// Whether a suffix was appended.
    pub truncated: bool,
    /// How many times the measurer was called.
    pub measurements: usize,
}

impl Fitted {
    /// Drop the bookkeeping.
    #[must_use]
    pub fn into_text(self) -> Text {
        self.text
    }
}

/// A measurer and configuration bound together.
///
/// Holds no state between calls; `fit` may run concurrently when the
/// measurer is `Sync`.
#[derive(Debug, Clone)]
pub struct LineFitter<M> {
    measure: M,
    config: FitConfig,
}

impl<M: LineMeasure> LineFitter<M> {
    /// Bind a measurer to a configuration.
    #[must_use]
    pub fn new(measure: M, config: FitConfig) -> Self {
        Self { measure, config }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// The bound measurer.
    #[must_use]
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Fit `full_text`; see [`fit`].
    ///
    /// # Errors
    ///
    /// See [`fit`].
    pub fn fit(&self, full_text: &str) -> Result<Text> {
        self.fit_detailed(full_text).map(Fitted::into_text)
    }

    /// Fit `full_text` and report how the result was reached.
    ///
    /// # Errors
    ///
    /// See [`fit`].
    pub fn fit_detailed(&self, full_text: &str) -> Result<Fitted> {
        fit_detailed(full_text, &self.measure, &self.config)
    }
}

impl<M: LineBreaks> LineFitter<M> {
    /// Fit starting from the first `max_lines + 1` rendered lines instead
    /// of the whole text.
    ///
    /// Nothing past those lines can survive truncation, so on long inputs
    /// this saves one measurement per dropped character. The extra line
    /// keeps a word that wrapping pushed out of the last allowed line in
    /// reach. With [`ShrinkStrategy::Linear`] the result equals
    /// [`LineFitter::fit`] whenever appending text never lowers the line
    /// count; [`ShrinkStrategy::Bisect`] keeps its own monotonicity
    /// requirement.
    ///
    /// # Errors
    ///
    /// See [`fit`].
    pub fn fit_from_head(&self, full_text: &str) -> Result<Fitted> {
        self.config.validate()?;
        let max_lines = self.config.max_lines;
        let bounds = self.measure.line_bounds(full_text);
        if bounds.len() <= max_lines {
            return Ok(untruncated(full_text, 1));
        }

        let head_chars = bounds[max_lines].end;
        let head_bytes = full_text
            .char_indices()
            .nth(head_chars)
            .map_or(full_text.len(), |(i, _)| i);
        let mut measurements = 1;
        let mut head = &full_text[..head_bytes];

        // The head must overflow on its own, or a longer prefix might fit.
        if head.len() < full_text.len() {
            measurements += 1;
            if self.measure.line_count(head) <= max_lines {
                log::debug!("fit_from_head: head of {head_chars} chars fits, using full text");
                head = full_text;
            }
        }

        log::debug!(
            "fit_from_head: {} lines, seeding with {} chars",
            bounds.len(),
            head.chars().count()
        );
        shrink(head, &self.measure, &self.config, measurements)
    }
}

/// Fit `full_text` within `config.max_lines` lines as measured by `measure`.
///
/// Returns the text unchanged (no spans) when it already fits. Otherwise
/// returns `prefix ++ suffix` with the label styled.
///
/// # Errors
///
/// Returns [`ShowMoreError::Configuration`] when `max_lines` is zero or when
/// the suffix alone overflows the limit.
pub fn fit<M: LineMeasure + ?Sized>(full_text: &str, measure: &M, config: &FitConfig) -> Result<Text> {
    fit_detailed(full_text, measure, config).map(Fitted::into_text)
}

/// [`fit`] with bookkeeping.
///
/// # Errors
///
/// See [`fit`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip_all,
        fields(len = full_text.len(), max_lines = config.max_lines)
    )
)]
pub fn fit_detailed<M: LineMeasure + ?Sized>(
    full_text: &str,
    measure: &M,
    config: &FitConfig,
) -> Result<Fitted> {
    config.validate()?;
    log::debug!(
        "fit: {} chars into {} lines",
        full_text.chars().count(),
        config.max_lines
    );

    let lines = measure.line_count(full_text);
    if lines <= config.max_lines {
        log::debug!("fit: {lines} lines, no truncation needed");
        return Ok(untruncated(full_text, 1));
    }

    shrink(full_text, measure, config, 1)
}

fn untruncated(full_text: &str, measurements: usize) -> Fitted {
    Fitted {
        text: Text::new(full_text),
        prefix_len: full_text.chars().count(),
        truncated: false,
        measurements,
    }
}

/// Counts calls and compares against the line limit.
struct Probe<'a, M: ?Sized> {
    measure: &'a M,
    prefix: &'a str,
    suffix: &'a str,
    max_lines: usize,
    calls: usize,
    last_lines: usize,
    candidate: String,
}

impl<M: LineMeasure + ?Sized> Probe<'_, M> {
    /// Line count of `prefix[..byte_end] ++ suffix`.
    fn lines(&mut self, byte_end: usize) -> usize {
        self.candidate.clear();
        self.candidate.push_str(&self.prefix[..byte_end]);
        self.candidate.push_str(self.suffix);
        self.calls += 1;
        let lines = self.measure.line_count(&self.candidate);
        self.last_lines = lines;
        log::trace!("fit: prefix of {byte_end} bytes -> {lines} lines");
        lines
    }

    fn fits(&mut self, byte_end: usize) -> bool {
        self.lines(byte_end) <= self.max_lines
    }
}

/// Shrink `prefix` until `prefix ++ suffix` fits.
fn shrink<M: LineMeasure + ?Sized>(
    prefix: &str,
    measure: &M,
    config: &FitConfig,
    measurements: usize,
) -> Result<Fitted> {
    let suffix = config.suffix();
    let cuts = unit_boundaries(prefix, config.trim);
    let mut probe = Probe {
        measure,
        prefix,
        suffix: &suffix,
        max_lines: config.max_lines,
        calls: measurements,
        last_lines: 0,
        candidate: String::with_capacity(prefix.len() + suffix.len()),
    };

    let kept = match config.strategy {
        ShrinkStrategy::Linear => cuts.iter().rev().copied().find(|&cut| probe.fits(cut)),
        ShrinkStrategy::Bisect => bisect(&cuts, &mut probe),
    };

    // Both strategies probe the empty prefix last before giving up.
    let Some(byte_end) = kept else {
        let suffix_lines = probe.last_lines;
        log::warn!(
            "fit: suffix {suffix:?} needs {suffix_lines} lines, limit is {}",
            config.max_lines
        );
        return Err(ShowMoreError::Configuration(ConfigError::SuffixOverflow {
            max_lines: config.max_lines,
            suffix_lines,
        }));
    };

    let mut text = Text::new(format!("{}{suffix}", &prefix[..byte_end]));
    config.style_label(&mut text);
    let prefix_len = prefix[..byte_end].chars().count();
    log::debug!(
        "fit: kept {prefix_len} chars after {} measurements",
        probe.calls
    );

    Ok(Fitted {
        text,
        prefix_len,
        truncated: true,
        measurements: probe.calls,
    })
}

/// Largest cut that fits, assuming fitting is monotone in cut length.
fn bisect<M: LineMeasure + ?Sized>(cuts: &[usize], probe: &mut Probe<'_, M>) -> Option<usize> {
    // Invariant: cuts[..lo] fit, cuts[hi..] overflow.
    let mut lo = 0;
    let mut hi = cuts.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if probe.fits(cuts[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo.checked_sub(1).map(|i| cuts[i])
}

/// Byte offsets at which `text` may be cut, ascending, from 0 to `text.len()`.
fn unit_boundaries(text: &str, unit: TrimUnit) -> Vec<usize> {
    let mut cuts: Vec<usize> = match unit {
        TrimUnit::Char => text.char_indices().map(|(i, _)| i).collect(),
        TrimUnit::Grapheme => text.grapheme_indices(true).map(|(i, _)| i).collect(),
    };
    cuts.push(text.len());
    cuts
}
