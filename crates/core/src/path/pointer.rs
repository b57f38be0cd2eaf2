//! JSON Pointer syntax (RFC 6901)
//!
//! The empty string addresses the whole value. Otherwise the pointer must
//! start with `/`; each token is unescaped, `-` means one past the end of a
//! list, and all-digit tokens are list positions.

use super::keypath::unescape_token;
use super::{Path, PathError, Step};

/// Parse a JSON Pointer into a path
///
/// # Examples
///
/// ```
/// use prefpath_core::{parse_pointer, Step};
///
/// let path = parse_pointer("/items/0/name").unwrap();
/// assert_eq!(
///     path.steps(),
///     &[Step::Field("items".into()), Step::Index(0), Step::Field("name".into())]
/// );
/// ```
pub fn parse_pointer(expr: &str) -> Result<Path, PathError> {
    if expr.is_empty() {
        return Ok(Path::root());
    }

    let body = expr
        .strip_prefix('/')
        .ok_or_else(|| PathError::MissingLeadingSlash(expr.to_string()))?;

    let mut steps = Vec::new();
    let mut offset = 1;
    for token in body.split('/') {
        let step = if token == "-" {
            Step::Append
        } else if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            let idx = token
                .parse::<usize>()
                .map_err(|_| PathError::InvalidIndex(offset, token.to_string()))?;
            Step::Index(idx)
        } else {
            Step::Field(unescape_token(token)?)
        };
        steps.push(step);
        offset += token.len() + 1;
    }

    Path::from_steps(steps)
}
