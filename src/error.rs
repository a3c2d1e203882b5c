//! Error types for fitting and merging.

use std::fmt;

use crate::style::StyleParseError;

/// Result alias used throughout the crate.
pub type Result<T, E = ShowMoreError> = std::result::Result<T, E>;

/// A fit configuration that can never produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_lines` was zero.
    ZeroMaxLines,
    /// Even an empty prefix leaves the suffix overflowing the line limit.
    SuffixOverflow {
        /// Configured line limit.
        max_lines: usize,
        /// Lines the bare suffix occupies.
        suffix_lines: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxLines => write!(f, "max_lines must be at least 1"),
            Self::SuffixOverflow {
                max_lines,
                suffix_lines,
            } => write!(
                f,
                "suffix alone needs {suffix_lines} lines but only {max_lines} are allowed"
            ),
        }
    }
}

/// Errors returned by [`crate::fit`] and [`crate::merge::try_merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowMoreError {
    /// Degenerate configuration (width too narrow, suffix too long, no lines).
    Configuration(ConfigError),
    /// A required input was absent.
    InvalidArgument {
        /// Name of the missing argument.
        name: &'static str,
    },
    /// A style string could not be parsed.
    Style(StyleParseError),
}

impl fmt::Display for ShowMoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "Configuration error: {e}"),
            Self::InvalidArgument { name } => write!(f, "Invalid argument: `{name}` is required"),
            Self::Style(e) => write!(f, "Style error: {e}"),
        }
    }
}

impl std::error::Error for ShowMoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Style(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ShowMoreError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err)
    }
}

impl From<StyleParseError> for ShowMoreError {
    fn from(err: StyleParseError) -> Self {
        Self::Style(err)
    }
}
