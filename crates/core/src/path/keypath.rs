//! Slash keypath syntax
//!
//! `root/seg/seg/...`: the first segment names the root key, every further
//! segment becomes a [`Step::Field`] (or [`Step::Append`] for the literal
//! `~]`). Segments are unescaped JSON-Pointer style (`~1` is `/`, `~0` is
//! `~`). Numeric segments stay fields; the walker treats them as positions
//! when it meets a list.

use super::{Path, PathError, Step};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segment that appends to a list
pub const APPEND_TOKEN: &str = "~]";

/// How empty segments from doubled slashes are handled
///
/// | Input | `Skip` | `Reject` |
/// |-------|--------|----------|
/// | `a/b` | `a` → `b` | `a` → `b` |
/// | `/a/b/` | `a` → `b` | `a` → `b` |
/// | `a//b` | `a` → `b` | `EmptySegment` |
/// | `///` | `Empty` | `EmptySegment` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentPolicy {
    /// Drop empty segments silently
    #[default]
    Skip,
    /// Fail on any empty segment other than one leading or trailing slash
    Reject,
}

impl FromStr for SegmentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(SegmentPolicy::Skip),
            "reject" => Ok(SegmentPolicy::Reject),
            other => Err(format!(
                "unknown empty segment policy '{}', expected \"skip\" or \"reject\"",
                other
            )),
        }
    }
}

impl fmt::Display for SegmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentPolicy::Skip => f.write_str("skip"),
            SegmentPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// A parsed slash keypath: root key plus the path within its value
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPath {
    root_key: String,
    relative: String,
    path: Path,
}

impl KeyPath {
    /// Root key the value is stored under
    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// Segments after the root key, as written (still escaped)
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Path within the root value
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split into root key and path
    pub fn into_parts(self) -> (String, Path) {
        (self.root_key, self.path)
    }
}

/// Parse a slash keypath
///
/// # Examples
///
/// ```
/// use prefpath_core::{parse_keypath, SegmentPolicy, Step};
///
/// let kp = parse_keypath("user/profile/name", SegmentPolicy::Skip).unwrap();
/// assert_eq!(kp.root_key(), "user");
/// assert_eq!(
///     kp.path().steps(),
///     &[Step::Field("profile".into()), Step::Field("name".into())]
/// );
/// ```
pub fn parse_keypath(expr: &str, policy: SegmentPolicy) -> Result<KeyPath, PathError> {
    let tokens = split_segments(expr, policy)?;

    let (first, rest) = tokens.split_first().ok_or(PathError::Empty)?;
    if *first == APPEND_TOKEN {
        return Err(PathError::AppendAsRootKey);
    }
    let root_key = unescape_token(first)?;

    let steps = rest
        .iter()
        .map(|seg| {
            if *seg == APPEND_TOKEN {
                Ok(Step::Append)
            } else {
                unescape_token(seg).map(Step::Field)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(KeyPath {
        root_key,
        relative: rest.join("/"),
        path: Path::from_steps(steps)?,
    })
}

fn split_segments(expr: &str, policy: SegmentPolicy) -> Result<Vec<&str>, PathError> {
    match policy {
        SegmentPolicy::Skip => Ok(expr.split('/').filter(|s| !s.is_empty()).collect()),
        SegmentPolicy::Reject => {
            let (start, body) = match expr.strip_prefix('/') {
                Some(stripped) => (1, stripped),
                None => (0, expr),
            };
            let body = body.strip_suffix('/').unwrap_or(body);
            if body.is_empty() {
                return if expr.len() > 1 {
                    Err(PathError::EmptySegment(start))
                } else {
                    Err(PathError::Empty)
                };
            }

            let mut segments = Vec::new();
            let mut offset = start;
            for seg in body.split('/') {
                if seg.is_empty() {
                    return Err(PathError::EmptySegment(offset));
                }
                segments.push(seg);
                offset += seg.len() + 1;
            }
            Ok(segments)
        }
    }
}

/// Decode JSON-Pointer escapes: `~1` becomes `/` and `~0` becomes `~`
pub fn unescape_token(token: &str) -> Result<String, PathError> {
    if !token.contains('~') {
        return Ok(token.to_string());
    }

    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return Err(PathError::InvalidEscape(token.to_string())),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
