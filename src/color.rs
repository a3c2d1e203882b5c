//! Colors carried by style ranges.
//!
//! The host decides how a color is painted; this module only names and
//! parses colors so that the action label can be given a foreground
//! (and optionally background) color.
//!
//! # Examples
//!
//! ```
//! use show_more::color::Color;
//!
//! let red = Color::parse("red").unwrap();
//! let orange = Color::parse("#ff8800").unwrap();
//! let short_hex = Color::parse("#f80").unwrap();
//! let custom = Color::parse("rgb(100, 150, 200)").unwrap();
//! assert_eq!(red.number, Some(1));
//! assert_eq!(orange.triplet, short_hex.triplet);
//! assert!(custom.triplet.is_some());
//! ```

use lru::LruCache;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::Mutex;

/// RGB color triplet with values 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorTriplet {
    /// Create a new color triplet from RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns CSS-style hex format `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// How a color was specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorType {
    /// The host's default foreground/background.
    #[default]
    Default,
    /// One of the 16 named palette colors.
    Standard,
    /// Explicit 24-bit color.
    TrueColor,
}

/// The 16 standard palette entries, indexed by palette number.
const STANDARD_PALETTE: [ColorTriplet; 16] = [
    ColorTriplet::new(0, 0, 0),
    ColorTriplet::new(128, 0, 0),
    ColorTriplet::new(0, 128, 0),
    ColorTriplet::new(128, 128, 0),
    ColorTriplet::new(0, 0, 128),
    ColorTriplet::new(128, 0, 128),
    ColorTriplet::new(0, 128, 128),
    ColorTriplet::new(192, 192, 192),
    ColorTriplet::new(128, 128, 128),
    ColorTriplet::new(255, 0, 0),
    ColorTriplet::new(0, 255, 0),
    ColorTriplet::new(255, 255, 0),
    ColorTriplet::new(0, 0, 255),
    ColorTriplet::new(255, 0, 255),
    ColorTriplet::new(0, 255, 255),
    ColorTriplet::new(255, 255, 255),
];

/// Canonical names of the standard palette, indexed by palette number.
const STANDARD_NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright_black",
    "bright_red",
    "bright_green",
    "bright_yellow",
    "bright_blue",
    "bright_magenta",
    "bright_cyan",
    "bright_white",
];

static NAMED_COLORS: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    let mut names: HashMap<&'static str, u8> = (0u8..)
        .zip(STANDARD_NAMES)
        .map(|(number, name)| (name, number))
        .collect();
    names.insert("grey", 8);
    names.insert("gray", 8);
    names
});

/// A color value attached to a style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    /// The name or literal the color was created from.
    pub name: String,
    /// How the color was specified.
    pub color_type: ColorType,
    /// Palette number for standard colors.
    pub number: Option<u8>,
    /// RGB components for true colors.
    pub triplet: Option<ColorTriplet>,
}

impl Color {
    /// The host's default color.
    #[must_use]
    pub fn default_color() -> Self {
        Self {
            name: "default".to_string(),
            color_type: ColorType::Default,
            number: None,
            triplet: None,
        }
    }

    /// Create a color from a standard palette number (wraps at 16).
    #[must_use]
    pub fn from_ansi(number: u8) -> Self {
        let number = number % 16;
        Self {
            name: STANDARD_NAMES[usize::from(number)].to_string(),
            color_type: ColorType::Standard,
            number: Some(number),
            triplet: None,
        }
    }

    /// Create a true color from RGB components.
    #[must_use]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let triplet = ColorTriplet::new(red, green, blue);
        Self {
            name: triplet.hex(),
            color_type: ColorType::TrueColor,
            number: None,
            triplet: Some(triplet),
        }
    }

    /// Check whether this is the host default color.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.color_type == ColorType::Default
    }

    /// Resolve to RGB. Default colors resolve to `None`.
    #[must_use]
    pub fn get_truecolor(&self) -> Option<ColorTriplet> {
        match self.color_type {
            ColorType::Default => None,
            ColorType::Standard => self
                .number
                .map(|n| STANDARD_PALETTE[usize::from(n % 16)]),
            ColorType::TrueColor => self.triplet,
        }
    }

    /// Parse a color string (cached).
    ///
    /// Supported formats:
    /// - Named colors: `red`, `bright_blue`
    /// - Hex format: `#FF0000`, `#F00`
    /// - RGB format: `rgb(255,0,0)`
    /// - Default: `default`
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the color string is empty, malformed, or
    /// names an unknown color.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> =
            LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(256).expect("non-zero"))));

        let normalized = color.trim().to_lowercase();

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

    fn parse_uncached(color: &str) -> Result<Self, ColorParseError> {
        static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
                .expect("valid regex")
        });

        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if color == "default" {
            return Ok(Self::default_color());
        }

        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(color.to_string()));
        }

        if let Some(caps) = RGB_RE.captures(color) {
            return match (
                caps[1].parse::<u8>(),
                caps[2].parse::<u8>(),
                caps[3].parse::<u8>(),
            ) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Self::from_rgb(r, g, b)),
                _ => Err(ColorParseError::InvalidRgb(color.to_string())),
            };
        }

        if let Some(&number) = NAMED_COLORS.get(color) {
            return Ok(Self::from_ansi(number));
        }

        Err(ColorParseError::UnknownColor(color.to_string()))
    }
}

/// Parse `RRGGBB` or the `RGB` shorthand.
fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(Color::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Nothing but whitespace.
    Empty,
    /// `#` followed by something other than 3 or 6 hex digits.
    InvalidHex(String),
    /// `rgb(r, g, b)` with a component above 255.
    InvalidRgb(String),
    /// Not a known color name.
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
