//! # show_more
//!
//! Fit long text into a fixed number of lines and append a "show more"
//! label that expands to the full text.
//!
//! ## Quick Start
//!
//! ```rust
//! use show_more::prelude::*;
//!
//! let config = FitConfig::new(2).ellipsis("...").spacer_width(1).action_label("more");
//! let fitter = LineFitter::new(CellWrap::new(20), config);
//!
//! let text = fitter.fit("The quick brown fox jumps over the lazy dog").unwrap();
//! assert_eq!(text.plain(), "The quick brown fox jumps over t... more");
//! ```
//!
//! ## Core Concepts
//!
//! - **LineMeasure**: the host's layout engine, reduced to "how many lines
//!   does this string take"
//! - **LineFitter**: finds the longest prefix that fits with the suffix
//! - **Text**: plain text plus overlapping style spans
//! - **merge**: prepend plain text to a `Text`, shifting its spans
//! - **ShowMore**: collapsed/expanded state driven by taps on the label

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod style;
pub mod cells;
pub mod text;
pub mod merge;
pub mod measure;
pub mod fit;
pub mod expand;
pub mod error;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::error::{ConfigError, Result, ShowMoreError};
    pub use crate::expand::ShowMore;
    pub use crate::fit::{FitConfig, Fitted, LineFitter, ShrinkStrategy, TrimUnit, fit};
    pub use crate::measure::{CellWrap, LineBreaks, LineMeasure, WrapMode, head_lines};
    pub use crate::merge::{merge, try_merge};
    pub use crate::style::{Action, Attributes, Style};
    pub use crate::text::{Span, SpanBoundary, Text};
}

// Re-export key types at crate root
pub use error::{ConfigError, Result, ShowMoreError};
pub use fit::{FitConfig, LineFitter, fit};
pub use measure::{CellWrap, LineMeasure};
pub use merge::merge;
pub use style::{Action, Style};
pub use text::{Span, Text};
