//! Parsing of dimension overrides embedded in descriptive text.
//!
//! Alt text may carry a pipe-delimited numeric suffix: `label|300` sets a
//! display width, `label|300x200` sets width and height. Anything that does
//! not match this shape exactly is treated as an opaque label; malformed
//! numeric suffixes are never coerced or truncated.

use crate::domain::entities::ParsedDescriptor;

/// Splits descriptive text into a label and optional display dimensions.
///
/// The input is trimmed first. A suffix after the last `|` must be either
/// `<digits>` or `<digits>x<digits>`, with every number a positive `u32`;
/// otherwise the whole trimmed text becomes the label. Re-parsing a label
/// that carries no pipe returns it unchanged.
#[must_use]
pub fn parse_descriptor(text: &str) -> ParsedDescriptor {
    let trimmed = text.trim();

    let Some((label, suffix)) = trimmed.rsplit_once('|') else {
        return ParsedDescriptor::label_only(trimmed);
    };

    match parse_suffix(suffix) {
        Some((width, height)) => ParsedDescriptor {
            label: label.trim().to_string(),
            width: Some(width),
            height,
        },
        None => ParsedDescriptor::label_only(trimmed),
    }
}

/// Parses `<digits>` or `<digits>x<digits>` into positive integers.
fn parse_suffix(suffix: &str) -> Option<(u32, Option<u32>)> {
    match suffix.split_once('x') {
        Some((w, h)) => Some((parse_positive(w)?, Some(parse_positive(h)?))),
        None => Some((parse_positive(suffix)?, None)),
    }
}

/// Accepts only non-empty all-digit input with a positive value in range.
fn parse_positive(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}
