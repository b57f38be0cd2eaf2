//! Generic tree walker
//!
//! [`walk`] descends a [`Value`] one [`Step`] at a time and hands each
//! container to a [`WalkHandler`]. The handler decides what happens at the
//! last step (read, test, remove, overwrite, append) and how to continue at
//! intermediate steps (recurse, stop, or synthesize a missing container).
//! Get, Exists, Delete and Set are four handler implementations over this
//! one traversal.
//!
//! ## Ownership
//!
//! The walker takes `&mut Value`: the tree is a private copy materialized
//! for one operation, so handlers mutate containers in place. A handler
//! that fails leaves the tree in an unspecified state and the caller
//! discards it.
//!
//! ## Dispatch
//!
//! | Step | Node | Callback |
//! |------|------|----------|
//! | `Index(i)` | list | array, `At(i)` |
//! | `Append` | list | array, `Append` |
//! | `Field(name)` | map | map, `name` |
//! | `Field("17")` | list | array, `At(17)` |
//! | anything else | | `TypeMismatch` |

use crate::path::Step;
use crate::value::{Value, ValueKind};
use std::collections::HashMap;
use thiserror::Error;

/// Error type for tree walking
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// Node has the wrong kind for the step
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// Kind the step requires
        expected: ValueKind,
        /// Kind found
        actual: ValueKind,
    },

    /// Target or an intermediate node does not exist
    #[error("path not found")]
    NotFound,

    /// Concrete list position past the end (writes only)
    #[error("array index out of bounds: {index} >= {len}")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The list length
        len: usize,
    },

    /// Wildcard or filter used by an operation that needs a single target
    #[error("query step {0} is only supported for reads and deletes")]
    QueryNotAllowed(String),

    /// Wildcard or filter reached the walker without being resolved
    #[error("query step {0} must be resolved before walking")]
    UnresolvedQuery(String),
}

/// Position selected within a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayPos {
    /// Existing (or out-of-range) position
    At(usize),
    /// One past the end
    Append,
}

/// Per-operation callbacks invoked by [`walk`]
///
/// `*_continue` callbacks receive the remaining steps (never empty) and are
/// responsible for recursing with [`walk`] into the child they select.
pub trait WalkHandler {
    /// Result of the operation
    type Output;

    /// Called when the path is empty: the whole value is the target
    fn on_root(&mut self, node: &mut Value) -> Result<Self::Output, WalkError>;

    /// Last step addresses a list position
    fn on_array_last(
        &mut self,
        arr: &mut Vec<Value>,
        pos: ArrayPos,
    ) -> Result<Self::Output, WalkError>;

    /// Intermediate step addresses a list position
    fn on_array_continue(
        &mut self,
        arr: &mut Vec<Value>,
        pos: ArrayPos,
        rest: &[Step],
    ) -> Result<Self::Output, WalkError>;

    /// Last step addresses a map member
    fn on_map_last(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
    ) -> Result<Self::Output, WalkError>;

    /// Intermediate step addresses a map member
    fn on_map_continue(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
        rest: &[Step],
    ) -> Result<Self::Output, WalkError>;
}

/// Walk `steps` from `node`, dispatching to `handler`
pub fn walk<H: WalkHandler + ?Sized>(
    node: &mut Value,
    steps: &[Step],
    handler: &mut H,
) -> Result<H::Output, WalkError> {
    let (step, rest) = match steps.split_first() {
        Some(split) => split,
        None => return handler.on_root(node),
    };
    let is_last = rest.is_empty();

    match (step, node) {
        (Step::Index(i), Value::Array(arr)) => {
            array_step(handler, arr, ArrayPos::At(*i), rest, is_last)
        }
        (Step::Append, Value::Array(arr)) => {
            array_step(handler, arr, ArrayPos::Append, rest, is_last)
        }
        (Step::Field(name), Value::Object(map)) => {
            if is_last {
                handler.on_map_last(map, name)
            } else {
                handler.on_map_continue(map, name, rest)
            }
        }
        (Step::Field(name), Value::Array(arr)) => match Step::digits_as_index(name) {
            Some(i) => array_step(handler, arr, ArrayPos::At(i), rest, is_last),
            None => Err(WalkError::TypeMismatch {
                expected: ValueKind::Object,
                actual: ValueKind::Array,
            }),
        },
        (Step::Index(_) | Step::Append, other) => Err(WalkError::TypeMismatch {
            expected: ValueKind::Array,
            actual: other.kind(),
        }),
        (Step::Field(_), other) => Err(WalkError::TypeMismatch {
            expected: ValueKind::Object,
            actual: other.kind(),
        }),
        (query, _) => Err(WalkError::UnresolvedQuery(query.to_string())),
    }
}

fn array_step<H: WalkHandler + ?Sized>(
    handler: &mut H,
    arr: &mut Vec<Value>,
    pos: ArrayPos,
    rest: &[Step],
    is_last: bool,
) -> Result<H::Output, WalkError> {
    if is_last {
        handler.on_array_last(arr, pos)
    } else {
        handler.on_array_continue(arr, pos, rest)
    }
}
