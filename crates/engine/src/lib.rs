//! Preferences engine for prefpath
//!
//! This crate ties the path model to a native store:
//! - Preferences: keypath, JSON Pointer and query operations with
//!   read-modify-write of whole root values
//! - Typed accessors without implicit coercion
//! - PrefsConfig: `prefpath.toml` backend and keypath policy settings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod prefs;

pub use config::{BackendKind, PrefsConfig, CONFIG_FILE_NAME};
pub use prefs::Preferences;
