//! Structural limits
//!
//! Paths longer than [`MAX_PATH_LENGTH`] are rejected at parse time.
//! Values nested deeper than [`MAX_NESTING_DEPTH`] are rejected before they
//! are written to a backend, which keeps every recursive marshal bounded.

use crate::value::Value;
use thiserror::Error;

/// Maximum number of steps in a path
pub const MAX_PATH_LENGTH: usize = 256;

/// Maximum container nesting depth of a stored value
pub const MAX_NESTING_DEPTH: usize = 128;

/// Error type for limit violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Value nests containers too deeply
    #[error("nesting too deep: {depth} levels exceeds maximum {max}")]
    NestingTooDeep {
        /// Actual depth
        depth: usize,
        /// Maximum allowed
        max: usize,
    },
}

/// Check that a value stays within [`MAX_NESTING_DEPTH`]
pub fn validate_depth(value: &Value) -> Result<(), LimitError> {
    let depth = value.depth();
    if depth > MAX_NESTING_DEPTH {
        Err(LimitError::NestingTooDeep {
            depth,
            max: MAX_NESTING_DEPTH,
        })
    } else {
        Ok(())
    }
}
