//! prefpath - path-addressable access to native preference stores
//!
//! A preference store keeps one whole value per (collection, key). prefpath
//! lets callers read and write *inside* those values with three path
//! syntaxes: slash keypaths, JSON Pointer and a JSONPath subset.
//!
//! # Quick Start
//!
//! ```
//! use prefpath::{Preferences, Value};
//!
//! let prefs = Preferences::in_memory();
//! prefs.set("com.example.app", "user/profile/name", "Ada")?;
//! prefs.set("com.example.app", "user/profile/age", 30)?;
//!
//! assert_eq!(prefs.get_str("com.example.app", "user/profile/name")?, "Ada");
//! assert_eq!(prefs.get_q("com.example.app", "user", "$.profile.age")?, Value::Int(30));
//!
//! prefs.delete("com.example.app", "user/profile/age")?;
//! assert!(!prefs.exists("com.example.app", "user/profile/age")?);
//! # Ok::<(), prefpath::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `prefpath-core`: values, errors, path parsers and the tree walker
//! - `prefpath-storage`: native backends and the value adapter
//! - `prefpath-engine`: the [`Preferences`] facade and configuration

pub use prefpath_core::{
    Error, ErrorKind, FromValue, Path, PathError, Result, SegmentPolicy, Step, Timestamp, Value,
    ValueKind,
};
pub use prefpath_engine::{BackendKind, Preferences, PrefsConfig, CONFIG_FILE_NAME};
pub use prefpath_storage::{FileBackend, MemoryBackend, NativeStore, PreferenceBackend};
