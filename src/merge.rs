//! Prepending plain text onto styled text.
//!
//! The merged text is `prefix ++ styled`. The prefix carries no style; every
//! span of `styled` moves right by the prefix's character count and is
//! otherwise untouched, so span count and order are preserved.
//!
//! ```
//! use show_more::merge::merge;
//! use show_more::style::Style;
//! use show_more::text::Text;
//!
//! let label = Text::styled("more", Style::new().bold());
//! let merged = merge("... ", &label);
//! assert_eq!(merged.plain(), "... more");
//! assert_eq!((merged.spans()[0].start, merged.spans()[0].end), (4, 8));
//! ```

use crate::error::{Result, ShowMoreError};
use crate::text::Text;

/// Prepend `prefix` to `styled`, shifting all spans.
#[must_use]
pub fn merge(prefix: &str, styled: &Text) -> Text {
    let offset = prefix.chars().count();
    let mut plain = String::with_capacity(prefix.len() + styled.plain().len());
    plain.push_str(prefix);
    plain.push_str(styled.plain());

    let spans = styled
        .spans()
        .iter()
        .map(|span| span.shifted(offset))
        .collect();

    Text::from_parts(plain, spans)
}

/// [`merge`] for hosts whose inputs may be absent.
///
/// # Errors
///
/// Returns [`ShowMoreError::InvalidArgument`] naming the first missing input.
pub fn try_merge(prefix: Option<&str>, styled: Option<&Text>) -> Result<Text> {
    let prefix = prefix.ok_or(ShowMoreError::InvalidArgument { name: "prefix" })?;
    let styled = styled.ok_or(ShowMoreError::InvalidArgument { name: "styled" })?;
    Ok(merge(prefix, styled))
}
