//! Error types for preference backends

use crate::archive::ArchiveError;
use crate::backend::HandleId;
use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors raised by a preference backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// I/O error from the underlying files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection file is not a valid archive
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Handle was never issued or has already been released
    #[error("unknown handle {0}")]
    UnknownHandle(HandleId),

    /// Collection file does not hold a dictionary at its top level
    #[error("collection {0} is not a dictionary")]
    NotADictionary(String),

    /// Value cannot be represented in the native type set
    #[error("unsupported value: {0}")]
    Unsupported(String),
}
