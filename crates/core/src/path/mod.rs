//! Path expressions
//!
//! Three syntaxes parse into the same [`Path`] of [`Step`]s:
//!
//! | Syntax | Entry point | Example |
//! |--------|-------------|---------|
//! | Slash keypath | [`parse_keypath`] | `user/profile/name`, `items/~]` |
//! | JSON Pointer | [`parse_pointer`] | `/profile/name`, `/items/-` |
//! | JSONPath subset | [`parse_query`] | `$.items[0]`, `$.pets[?(@.kind == 'cat')]` |
//!
//! A slash keypath names its root key in the first segment; the other two
//! syntaxes address within a root key supplied separately.

mod keypath;
mod pointer;
mod query;
mod step;

pub use keypath::{parse_keypath, unescape_token, KeyPath, SegmentPolicy};
pub use pointer::parse_pointer;
pub use query::parse_query;
pub use step::{compare_steps, Predicate, Step};

use crate::limits::MAX_PATH_LENGTH;
use std::fmt;
use thiserror::Error;

/// Error type for path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path has no usable segments
    #[error("keypath cannot be empty")]
    Empty,
    /// Empty segment between two separators
    #[error("empty segment at position {0}")]
    EmptySegment(usize),
    /// Malformed `~` escape
    #[error("invalid escape sequence in segment '{0}'")]
    InvalidEscape(String),
    /// JSON Pointer without a leading `/`
    #[error("JSON pointer must start with '/': {0}")]
    MissingLeadingSlash(String),
    /// The append marker used where a root key is required
    #[error("append marker cannot name a root key")]
    AppendAsRootKey,
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    /// Filter expression without its closing `)]`
    #[error("unterminated filter expression starting at position {0}")]
    UnterminatedFilter(usize),
    /// Filter expression that is not `@... == literal`
    #[error("invalid filter expression: {0}")]
    InvalidFilter(String),
    /// Too many steps
    #[error("path too long: {len} steps exceeds maximum {max}")]
    TooLong {
        /// Number of steps parsed
        len: usize,
        /// Maximum allowed
        max: usize,
    },
}

/// Parsed path within one root value
///
/// Constructed fresh per call and never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// Path addressing the whole root value
    pub fn root() -> Self {
        Path { steps: Vec::new() }
    }

    /// Create a path from steps
    ///
    /// Fails when the step count exceeds [`MAX_PATH_LENGTH`].
    pub fn from_steps(steps: Vec<Step>) -> Result<Self, PathError> {
        if steps.len() > MAX_PATH_LENGTH {
            return Err(PathError::TooLong {
                len: steps.len(),
                max: MAX_PATH_LENGTH,
            });
        }
        Ok(Path { steps })
    }

    /// Get the steps
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there are no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check if this path addresses the whole root value
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check if any step can select more than one node
    pub fn has_query_steps(&self) -> bool {
        self.steps.iter().any(Step::is_query)
    }

    /// Builder: add a field step
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::Field(name.into()));
        self
    }

    /// Builder: add an index step
    pub fn index(mut self, idx: usize) -> Self {
        self.steps.push(Step::Index(idx));
        self
    }

    /// Builder: add an append step
    pub fn append(mut self) -> Self {
        self.steps.push(Step::Append);
        self
    }
}

impl fmt::Display for Path {
    /// Renders in JSONPath form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
