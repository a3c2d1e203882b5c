//! Visual and interactive treatment of a character range.
//!
//! A `Style` bundles everything a host needs to draw and dispatch a styled
//! range: colors, text attributes, an absolute text size, and an optional
//! [`Action`] marking the range as activatable.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use bitflags::bitflags;
use lru::LruCache;

use crate::color::{Color, ColorParseError};

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold text.
        const BOLD      = 1 << 0;
        /// Dim/faint text.
        const DIM       = 1 << 1;
        /// Italic text.
        const ITALIC    = 1 << 2;
        /// Underlined text.
        const UNDERLINE = 1 << 3;
        /// Strikethrough text.
        const STRIKE    = 1 << 4;
    }
}

/// What the host should do when a styled range is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Replace the truncated display with the full original text.
    Expand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expand => write!(f, "expand"),
        }
    }
}

/// Visual style of a text range.
///
/// Styles can be combined using the `+` operator, where the right-hand style
/// takes precedence for conflicting properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
    /// Which attributes are explicitly set (vs inherited).
    pub set_attributes: Attributes,
    /// Absolute text size in host units (px, pt, ...).
    pub size: Option<u16>,
    /// Activation behaviour.
    pub action: Option<Action>,
    /// Whether this is a null/empty style.
    null: bool,
}

impl Style {
    /// Create an empty (null) style.
    #[must_use]
    pub fn null() -> Self {
        Self {
            null: true,
            ..Default::default()
        }
    }

    /// Create a new style builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this is a null/empty style.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.null
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self.null = false;
        self
    }

    /// Set the foreground color from a string.
    ///
    /// # Errors
    ///
    /// Returns [`StyleParseError::ColorError`] if the color does not parse.
    pub fn color_str(self, color: &str) -> Result<Self, StyleParseError> {
        let c = Color::parse(color)?;
        Ok(self.color(c))
    }

    /// Set the background color.
    #[must_use]
    pub fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self.null = false;
        self
    }

    /// Set the background color from a string.
    ///
    /// # Errors
    ///
    /// Returns [`StyleParseError::ColorError`] if the color does not parse.
    pub fn bgcolor_str(self, color: &str) -> Result<Self, StyleParseError> {
        let c = Color::parse(color)?;
        Ok(self.bgcolor(c))
    }

    /// Set the absolute text size.
    #[must_use]
    pub fn size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self.null = false;
        self
    }

    /// Mark the range as activatable.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self.null = false;
        self
    }

    /// Enable an attribute.
    #[must_use]
    pub fn with(mut self, attr: Attributes) -> Self {
        self.attributes.insert(attr);
        self.set_attributes.insert(attr);
        self.null = false;
        self
    }

    /// Enable bold text.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with(Attributes::BOLD)
    }

    /// Enable italic text.
    #[must_use]
    pub fn italic(self) -> Self {
        self.with(Attributes::ITALIC)
    }

    /// Enable underlined text.
    #[must_use]
    pub fn underline(self) -> Self {
        self.with(Attributes::UNDERLINE)
    }

    /// Disable a specific attribute.
    #[must_use]
    pub fn not(mut self, attr: Attributes) -> Self {
        self.attributes.remove(attr);
        self.set_attributes.insert(attr);
        self.null = false;
        self
    }

    /// Split into the visual part and the action.
    ///
    /// Hosts typically paint and dispatch through different mechanisms, so
    /// a fitted label carries them as two stacked ranges.
    #[must_use]
    pub fn split_action(&self) -> (Style, Option<Action>) {
        let mut visual = self.clone();
        let action = visual.action.take();
        if visual.color.is_none()
            && visual.bgcolor.is_none()
            && visual.set_attributes.is_empty()
            && visual.size.is_none()
        {
            visual.null = true;
        }
        (visual, action)
    }

    /// Combine this style with another, with the other style taking precedence.
    #[must_use]
    pub fn combine(&self, other: &Style) -> Style {
        if other.is_null() {
            return self.clone();
        }
        if self.is_null() {
            return other.clone();
        }

        Style {
            color: other.color.clone().or_else(|| self.color.clone()),
            bgcolor: other.bgcolor.clone().or_else(|| self.bgcolor.clone()),
            attributes: (self.attributes & !other.set_attributes)
                | (other.attributes & other.set_attributes),
            set_attributes: self.set_attributes | other.set_attributes,
            size: other.size.or(self.size),
            action: other.action.or(self.action),
            null: false,
        }
    }

    /// Parse a style from a string (cached).
    ///
    /// Supported formats:
    /// - Empty/none: `""`, `"none"` -> null style
    /// - Attribute: `"bold"`, `"italic"`, `"underline"`
    /// - Negative: `"not bold"`
    /// - Color: `"red"`, `"#ff0000"`
    /// - Background: `"on red"`
    /// - Size: `"size 14"`
    /// - Action: `"expand"`
    /// - Combined: `"bold red on white size 14 expand"`
    pub fn parse(style: &str) -> Result<Self, StyleParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Style>>> = LazyLock::new(|| {
            Mutex::new(LruCache::new(NonZeroUsize::new(128).expect("non-zero")))
        });

        let normalized = style.trim().to_lowercase();

        if let Ok(mut cache) = CACHE.lock()
            && let Some(cached) = cache.get(&normalized)
        {
            return Ok(cached.clone());
        }

        let result = Self::parse_uncached(&normalized)?;

        if let Ok(mut cache) = CACHE.lock() {
            cache.put(normalized, result.clone());
        }

        Ok(result)
    }

    fn parse_uncached(style: &str) -> Result<Self, StyleParseError> {
        if style.is_empty() || style == "none" {
            return Ok(Self::null());
        }

        let mut result = Style::new();
        let mut words = style.split_whitespace();

        while let Some(word) = words.next() {
            match word {
                "not" => {
                    let attr_name = words.next().ok_or_else(|| {
                        StyleParseError::InvalidFormat("'not' requires an attribute".to_string())
                    })?;
                    let attr = parse_attribute(attr_name)
                        .ok_or_else(|| StyleParseError::UnknownAttribute(attr_name.to_string()))?;
                    result = result.not(attr);
                }
                "on" => {
                    let color_name = words.next().ok_or_else(|| {
                        StyleParseError::InvalidFormat("'on' requires a color".to_string())
                    })?;
                    result = result.bgcolor_str(color_name)?;
                }
                "size" => {
                    let size = words
                        .next()
                        .and_then(|s| s.parse::<u16>().ok())
                        .ok_or_else(|| {
                            StyleParseError::InvalidFormat("'size' requires a number".to_string())
                        })?;
                    result = result.size(size);
                }
                "expand" => result = result.action(Action::Expand),
                _ => {
                    if let Some(attr) = parse_attribute(word) {
                        result = result.with(attr);
                    } else if Color::parse(word).is_ok() {
                        result = result.color_str(word)?;
                    } else {
                        return Err(StyleParseError::UnknownToken(word.to_string()));
                    }
                }
            }
        }

        Ok(result)
    }
}

impl std::ops::Add for Style {
    type Output = Style;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(&rhs)
    }
}

impl std::ops::Add<&Style> for &Style {
    type Output = Style;

    fn add(self, rhs: &Style) -> Self::Output {
        self.combine(rhs)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "none");
        }

        let mut parts = Vec::new();

        for (attr, name) in [
            (Attributes::BOLD, "bold"),
            (Attributes::DIM, "dim"),
            (Attributes::ITALIC, "italic"),
            (Attributes::UNDERLINE, "underline"),
            (Attributes::STRIKE, "strike"),
        ] {
            if self.attributes.contains(attr) {
                parts.push(name.to_string());
            }
        }

        if let Some(color) = &self.color {
            parts.push(color.to_string());
        }
        if let Some(bgcolor) = &self.bgcolor {
            parts.push(format!("on {bgcolor}"));
        }
        if let Some(size) = self.size {
            parts.push(format!("size {size}"));
        }
        if let Some(action) = self.action {
            parts.push(action.to_string());
        }

        write!(f, "{}", parts.join(" "))
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse an attribute name to its flag.
fn parse_attribute(name: &str) -> Option<Attributes> {
    match name {
        "bold" | "b" => Some(Attributes::BOLD),
        "dim" | "d" => Some(Attributes::DIM),
        "italic" | "i" => Some(Attributes::ITALIC),
        "underline" | "u" => Some(Attributes::UNDERLINE),
        "strike" | "s" => Some(Attributes::STRIKE),
        _ => None,
    }
}

/// Error type for style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    /// A keyword was missing its argument (`"on"`, `"not"`, `"size"`).
    InvalidFormat(String),
    /// `not` was followed by something other than an attribute.
    UnknownAttribute(String),
    /// A word that is neither a keyword, an attribute nor a color.
    UnknownToken(String),
    /// A color operand did not parse.
    ColorError(ColorParseError),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid style format: {s}"),
            Self::UnknownAttribute(s) => write!(f, "Unknown attribute: {s}"),
            Self::UnknownToken(s) => write!(f, "Unknown token: {s}"),
            Self::ColorError(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for StyleParseError {}

impl From<ColorParseError> for StyleParseError {
    fn from(err: ColorParseError) -> Self {
        Self::ColorError(err)
    }
}
