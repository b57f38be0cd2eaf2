//! Error types for prefpath
//!
//! Every public operation fails with one of four kinds: key not found,
//! invalid key path, type mismatch, or an internal (backend) failure.
//! Callers classify errors through [`Error::kind`] or the `is_*` helpers,
//! never by matching on the message text.
//!
//! Lower layers report narrower errors ([`PathError`](crate::PathError),
//! [`WalkError`](crate::WalkError)) that convert into [`Error`]; context such
//! as the collection, root key and path is attached with the `with_*`
//! builders on the way up.

use crate::path::PathError;
use crate::value::ValueKind;
use crate::walk::WalkError;
use std::fmt;
use thiserror::Error;

/// Result type alias for prefpath operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed underlying cause
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The root key or a node along the path does not exist
    KeyNotFound,
    /// The path expression is malformed or cannot be applied
    InvalidKeyPath,
    /// A value had a different dynamic type than required
    TypeMismatch,
    /// Backend or adapter failure
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::KeyNotFound => "key not found",
            ErrorKind::InvalidKeyPath => "key path error",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::Internal => "internal error",
        };
        f.write_str(s)
    }
}

/// Where an error happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Collection (application id) the operation addressed
    pub collection: String,
    /// Root key the operation addressed
    pub key: String,
    /// Path within the root value, as written by the caller
    pub path: Option<String>,
    /// Free-form detail
    pub msg: Option<String>,
}

impl ErrorContext {
    /// Root key, followed by the path when one is known
    pub fn location(&self) -> String {
        match self.path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}:{}", self.key, path),
            _ => self.key.clone(),
        }
    }

    fn suffix(&self) -> String {
        match &self.msg {
            Some(msg) => format!(" - {}", msg),
            None => String::new(),
        }
    }
}

/// Error type for every public prefpath operation
#[derive(Debug, Error)]
pub enum Error {
    /// Root key or path target does not exist
    #[error("key not found: {} [{}]{}", .ctx.location(), .ctx.collection, .ctx.suffix())]
    KeyNotFound {
        /// Location details
        ctx: ErrorContext,
    },

    /// Path expression is malformed or cannot be applied to the value
    #[error("key path error: {} [{}]{}", .ctx.location(), .ctx.collection, .ctx.suffix())]
    InvalidKeyPath {
        /// Location details
        ctx: ErrorContext,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },

    /// Resolved value has a different dynamic type than required
    #[error(
        "type mismatch: {} [{}] - expected {}, got {}",
        .ctx.location(),
        .ctx.collection,
        .expected,
        .actual
    )]
    TypeMismatch {
        /// Location details
        ctx: ErrorContext,
        /// Kind that was required
        expected: ValueKind,
        /// Kind that was found
        actual: ValueKind,
    },

    /// Backend or adapter failure
    #[error("internal error: {} [{}]{}", .ctx.location(), .ctx.collection, .ctx.suffix())]
    Internal {
        /// Location details
        ctx: ErrorContext,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Key-not-found error with empty context
    pub fn key_not_found() -> Self {
        Error::KeyNotFound {
            ctx: ErrorContext::default(),
        }
    }

    /// Invalid-key-path error with empty context
    pub fn invalid_key_path() -> Self {
        Error::InvalidKeyPath {
            ctx: ErrorContext::default(),
            source: None,
        }
    }

    /// Type-mismatch error with empty context
    pub fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Error::TypeMismatch {
            ctx: ErrorContext::default(),
            expected,
            actual,
        }
    }

    /// Internal error with empty context
    pub fn internal() -> Self {
        Error::Internal {
            ctx: ErrorContext::default(),
            source: None,
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Attach the collection id
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.ctx_mut().collection = collection.into();
        self
    }

    /// Attach the root key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.ctx_mut().key = key.into();
        self
    }

    /// Attach the path within the root value
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.ctx_mut().path = Some(path.into());
        self
    }

    /// Attach a detail message, replacing any previous one
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.ctx_mut().msg = Some(msg.into());
        self
    }

    /// Attach an underlying cause
    ///
    /// Only `InvalidKeyPath` and `Internal` carry a cause; for the other
    /// kinds the cause's message is kept as the detail message instead.
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        let cause = cause.into();
        match &mut self {
            Error::InvalidKeyPath { source, .. } | Error::Internal { source, .. } => {
                *source = Some(cause);
            }
            Error::KeyNotFound { ctx } | Error::TypeMismatch { ctx, .. } => {
                if ctx.msg.is_none() {
                    ctx.msg = Some(cause.to_string());
                }
            }
        }
        self
    }

    /// Fill in collection and key where they are still empty
    ///
    /// Used when an error raised deep in a call is handed back through a
    /// layer that knows where the operation was aimed.
    pub fn in_context(mut self, collection: &str, key: &str, path: Option<&str>) -> Self {
        let ctx = self.ctx_mut();
        if ctx.collection.is_empty() {
            ctx.collection = collection.to_string();
        }
        if ctx.key.is_empty() {
            ctx.key = key.to_string();
        }
        if ctx.path.is_none() {
            ctx.path = path.map(str::to_string);
        }
        self
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// Sentinel classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Error::InvalidKeyPath { .. } => ErrorKind::InvalidKeyPath,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this is a key-not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::KeyNotFound
    }

    /// Check if this is an invalid-key-path error
    pub fn is_invalid_path(&self) -> bool {
        self.kind() == ErrorKind::InvalidKeyPath
    }

    /// Check if this is a type-mismatch error
    pub fn is_type_mismatch(&self) -> bool {
        self.kind() == ErrorKind::TypeMismatch
    }

    /// Check if this is an internal error
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Location details
    pub fn ctx(&self) -> &ErrorContext {
        match self {
            Error::KeyNotFound { ctx }
            | Error::InvalidKeyPath { ctx, .. }
            | Error::TypeMismatch { ctx, .. }
            | Error::Internal { ctx, .. } => ctx,
        }
    }

    fn ctx_mut(&mut self) -> &mut ErrorContext {
        match self {
            Error::KeyNotFound { ctx }
            | Error::InvalidKeyPath { ctx, .. }
            | Error::TypeMismatch { ctx, .. }
            | Error::Internal { ctx, .. } => ctx,
        }
    }

    /// Collection id the failing operation addressed
    pub fn collection(&self) -> &str {
        &self.ctx().collection
    }

    /// Root key the failing operation addressed
    pub fn key(&self) -> &str {
        &self.ctx().key
    }

    /// Path within the root value, if known
    pub fn path(&self) -> Option<&str> {
        self.ctx().path.as_deref()
    }

    /// Detail message, if any
    pub fn msg(&self) -> Option<&str> {
        self.ctx().msg.as_deref()
    }
}

impl From<PathError> for Error {
    fn from(e: PathError) -> Self {
        Error::invalid_key_path()
            .with_msg(e.to_string())
            .with_source(e)
    }
}

impl From<WalkError> for Error {
    fn from(e: WalkError) -> Self {
        match e {
            WalkError::NotFound => Error::key_not_found(),
            WalkError::TypeMismatch { expected, actual } => Error::type_mismatch(expected, actual),
            WalkError::IndexOutOfBounds { .. } => Error::invalid_key_path()
                .with_msg("array index out of bounds")
                .with_source(e),
            WalkError::QueryNotAllowed(_) | WalkError::UnresolvedQuery(_) => {
                Error::invalid_key_path().with_msg(e.to_string()).with_source(e)
            }
        }
    }
}
