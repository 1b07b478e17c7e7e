#![forbid(unsafe_code)]

//! Positional `{N}` template formatting.
//!
//! # Invariants
//!
//! 1. **Single pass**: placeholders are substituted left to right exactly
//!    once; text produced by a parameter is never rescanned.
//!
//! 2. **Only `{digits}` is a placeholder**: `{}`, `{name}`, `{-1}` and
//!    unclosed braces are emitted literally.
//!
//! 3. **Out-of-range is empty**: a placeholder whose index has no parameter
//!    (including indices too large for `usize`) is replaced by `""`.
//!
//! There is no escape syntax, so a literal `{0}` cannot survive formatting
//! when the template is passed through [`format`].

use std::fmt::{Display, Write};

/// Substitute `{N}` placeholders in `template` with `params[N]`.
///
/// ```
/// use localizable::format;
///
/// assert_eq!(format("Hello {0}!", &[&"Bear"]), "Hello Bear!");
/// assert_eq!(format("{0} {1} {2}", &[&"a", &"b"]), "a b ");
/// assert_eq!(format("{0}% of {1}", &[&42, &'x']), "42% of x");
/// ```
#[must_use]
pub fn format(template: &str, params: &[&dyn Display]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match parse_placeholder(after) {
            Some((index, consumed)) => {
                if let Some(param) = index.and_then(|i| params.get(i)) {
                    // Writing into a String cannot fail.
                    let _ = write!(result, "{param}");
                }
                rest = &after[consumed..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);

    result
}

/// Indices referenced by `template`, in order of appearance.
///
/// Indices that overflow `usize` are omitted since no parameter list can
/// ever satisfy them.
#[must_use]
pub fn placeholder_indices(template: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match parse_placeholder(after) {
            Some((index, consumed)) => {
                indices.extend(index);
                rest = &after[consumed..];
            }
            None => rest = after,
        }
    }
    indices
}

/// Parse `digits}` at the start of `s` (the opening brace already consumed).
///
/// Returns the parsed index (`None` on overflow) and the number of bytes
/// consumed including the closing brace, or `None` when `s` does not start
/// a placeholder.
fn parse_placeholder(s: &str) -> Option<(Option<usize>, usize)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || s.as_bytes().get(digits) != Some(&b'}') {
        return None;
    }
    Some((s[..digits].parse::<usize>().ok(), digits + 1))
}
