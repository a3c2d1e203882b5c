//! Collapsed/expanded display state for a host widget.
//!
//! `ShowMore` owns the original text and a [`LineFitter`]. After
//! [`ShowMore::layout`] it shows either the full text (when it fits) or the
//! fitted, truncated text. Activating the label range swaps the display back
//! to the full text.
//!
//! ```
//! use show_more::expand::ShowMore;
//! use show_more::fit::{FitConfig, LineFitter};
//! use show_more::measure::{CellWrap, WrapMode};
//!
//! let config = FitConfig::new(1).ellipsis("...").spacer_width(1).action_label("more");
//! let fitter = LineFitter::new(CellWrap::new(10).mode(WrapMode::Char), config);
//! let mut view = ShowMore::new("ABCDEFGHIJKLMNOPQRST", fitter).unwrap();
//!
//! assert_eq!(view.display().plain(), "AB... more");
//! assert!(view.activate(7));
//! assert_eq!(view.display().plain(), "ABCDEFGHIJKLMNOPQRST");
//! ```

use crate::error::Result;
use crate::fit::LineFitter;
use crate::measure::LineMeasure;
use crate::style::Action;
use crate::text::Text;

/// Display state of a single truncatable text.
#[derive(Debug, Clone)]
pub struct ShowMore<M> {
    original: String,
    fitter: LineFitter<M>,
    display: Text,
    truncated: bool,
    expanded: bool,
}

impl<M: LineMeasure> ShowMore<M> {
    /// Create and lay out.
    ///
    /// # Errors
    ///
    /// Propagates fitting errors.
    pub fn new(original: impl Into<String>, fitter: LineFitter<M>) -> Result<Self> {
        let original = original.into();
        let mut view = Self {
            display: Text::new(original.as_str()),
            original,
            fitter,
            truncated: false,
            expanded: false,
        };
        view.layout()?;
        Ok(view)
    }

    /// Re-run fitting, e.g. after the measurer's width changed.
    ///
    /// An expanded view stays expanded.
    ///
    /// # Errors
    ///
    /// Propagates fitting errors; the display is left unchanged on error.
    pub fn layout(&mut self) -> Result<()> {
        if self.expanded {
            return Ok(());
        }
        let fitted = self.fitter.fit_detailed(&self.original)?;
        self.truncated = fitted.truncated;
        self.display = fitted.text;
        Ok(())
    }

    /// Replace the measurer and lay out again.
    ///
    /// # Errors
    ///
    /// Propagates fitting errors.
    pub fn set_measure(&mut self, measure: M) -> Result<()> {
        let config = self.fitter.config().clone();
        self.fitter = LineFitter::new(measure, config);
        self.layout()
    }

    /// Text to draw.
    #[must_use]
    pub fn display(&self) -> &Text {
        &self.display
    }

    /// The untruncated text.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Whether the display currently shows a truncated text.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated && !self.expanded
    }

    /// Whether the label has been activated.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Line limit the host should apply; `None` means unlimited.
    #[must_use]
    pub fn max_lines(&self) -> Option<usize> {
        let config = self.fitter.config();
        if self.expanded && config.unlimited_on_expand {
            None
        } else {
            Some(config.max_lines)
        }
    }

    /// Action under a character offset of the displayed text.
    #[must_use]
    pub fn action_at(&self, offset: usize) -> Option<Action> {
        if !self.is_truncated() {
            return None;
        }
        self.display
            .spans_at(offset)
            .find_map(|span| span.style.action)
    }

    /// Dispatch a tap at a character offset. Returns whether it expanded.
    pub fn activate(&mut self, offset: usize) -> bool {
        match self.action_at(offset) {
            Some(Action::Expand) => {
                self.expand();
                true
            }
            None => false,
        }
    }

    /// Show the full text.
    pub fn expand(&mut self) {
        log::debug!("show_more: expanding {} chars", self.original.chars().count());
        self.display = Text::new(self.original.as_str());
        self.expanded = true;
    }

    /// Return to the fitted display.
    ///
    /// # Errors
    ///
    /// Propagates fitting errors.
    pub fn collapse(&mut self) -> Result<()> {
        self.expanded = false;
        self.layout()
    }
}
