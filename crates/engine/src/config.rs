//! Preferences configuration via `prefpath.toml`
//!
//! A config file picks the backend and the keypath empty-segment policy.
//! [`crate::Preferences::open_dir`] writes a default file into the directory
//! on first open; edit it and reopen to change settings.

use prefpath_core::{Error, Result, SegmentPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file name placed in a preferences directory.
pub const CONFIG_FILE_NAME: &str = "prefpath.toml";

/// Backend selected by a [`PrefsConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Process-local, lost on drop
    Memory,
    /// One archive file per collection under the given directory
    File(PathBuf),
}

/// Preferences configuration loaded from `prefpath.toml`.
///
/// # Example
///
/// ```toml
/// backend = "file"
/// data_dir = "/var/lib/prefpath"
/// empty_segments = "reject"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrefsConfig {
    /// Backend: `"memory"` or `"file"`.
    #[serde(default = "default_backend_str")]
    pub backend: String,
    /// Directory for the file backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Empty keypath segments (`a//b`): `"skip"` or `"reject"`.
    #[serde(default = "default_empty_segments_str")]
    pub empty_segments: String,
}

fn default_backend_str() -> String {
    "memory".to_string()
}

fn default_empty_segments_str() -> String {
    SegmentPolicy::default().to_string()
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend_str(),
            data_dir: None,
            empty_segments: default_empty_segments_str(),
        }
    }
}

impl PrefsConfig {
    /// Parse the backend selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"memory"` or `"file"`, or if
    /// `"file"` is chosen without a `data_dir`.
    pub fn backend_kind(&self) -> Result<BackendKind> {
        match self.backend.as_str() {
            "memory" => Ok(BackendKind::Memory),
            "file" => match &self.data_dir {
                Some(dir) => Ok(BackendKind::File(dir.clone())),
                None => Err(Error::internal()
                    .with_msg("backend \"file\" in prefpath.toml requires data_dir")),
            },
            other => Err(Error::internal().with_msg(format!(
                "Invalid backend '{}' in prefpath.toml. Expected \"memory\" or \"file\".",
                other
            ))),
        }
    }

    /// Parse the empty-segment policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"skip"` or `"reject"`.
    pub fn segment_policy(&self) -> Result<SegmentPolicy> {
        self.empty_segments.parse().map_err(|e: String| {
            Error::internal().with_msg(format!("{} in prefpath.toml", e))
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# prefpath configuration
#
# Backend: "memory" (default) or "file"
#   "memory" = process-local, nothing persists
#   "file"   = one archive per collection under data_dir
backend = "memory"

# Directory for the file backend (required when backend = "file").
# data_dir = "/path/to/prefs"

# Empty keypath segments such as "a//b": "skip" (default) or "reject"
#   "skip"   = drop empty segments, "a//b" means "a/b"
#   "reject" = treat them as an invalid key path
empty_segments = "skip"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid setting.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::internal()
                .with_msg(format!("Failed to read config file '{}'", path.display()))
                .with_source(e)
        })?;
        let config: PrefsConfig = toml::from_str(&content).map_err(|e| {
            Error::internal()
                .with_msg(format!("Failed to parse config file '{}'", path.display()))
                .with_source(e)
        })?;
        config.segment_policy()?;
        // A file backend may take its data_dir from the directory it is opened in
        if config.backend != "file" {
            config.backend_kind()?;
        }
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::internal()
                    .with_msg(format!(
                        "Failed to write default config file '{}'",
                        path.display()
                    ))
                    .with_source(e)
            })?;
            info!(target: "prefpath::config", path = ?path, "Default config written");
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::internal()
                .with_msg("Failed to serialize config")
                .with_source(e)
        })?;
        std::fs::write(path, content).map_err(|e| {
            Error::internal()
                .with_msg(format!("Failed to write config file '{}'", path.display()))
                .with_source(e)
        })
    }
}
