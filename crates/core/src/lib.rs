//! Core types and algorithms for prefpath
//!
//! This crate defines everything that operates on a value once it has been
//! read from a preference store:
//! - Value / ValueKind: the dynamic value model
//! - Timestamp: microsecond-precision instants
//! - Error / ErrorKind: the public error model
//! - Path parsing: slash keypaths, JSON Pointer and a JSONPath subset
//! - Tree walking: one generic walker with Get, Exists, Delete and Set handlers
//! - Query resolution for wildcard and filter steps
//! - Typed accessors (FromValue)
//! - Limits: MAX_PATH_LENGTH, MAX_NESTING_DEPTH

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod ops;
pub mod path;
pub mod timestamp;
pub mod typed;
pub mod value;
pub mod walk;

pub use error::{BoxError, Error, ErrorContext, ErrorKind, Result};
pub use limits::{validate_depth, LimitError, MAX_NESTING_DEPTH, MAX_PATH_LENGTH};
pub use path::{
    parse_keypath, parse_pointer, parse_query, KeyPath, Path, PathError, Predicate, SegmentPolicy,
    Step,
};
pub use timestamp::Timestamp;
pub use typed::{cast, FromValue};
pub use value::{Value, ValueKind};
pub use walk::{walk, ArrayPos, WalkError, WalkHandler};
