//! Native preference storage for prefpath
//!
//! This crate implements the boundary to a native preference store:
//! - NativeValue: the store's own type set (sized numbers, 2001-epoch dates)
//! - PreferenceBackend: acquire / copy / set / synchronize / release protocol
//! - Handle: RAII guard releasing a backend handle exactly once
//! - MemoryBackend: in-process store with handle accounting
//! - FileBackend: one atomically replaced archive file per collection
//! - archive: the store's binary property-list encoding
//! - marshal: Value <-> NativeValue, epoch conversion, blob decoding chain
//! - NativeStore: whole-root-value adapter returning prefpath errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod archive;
pub mod backend;
pub mod error;
pub mod file;
pub mod marshal;
pub mod memory;
pub mod native;

pub use adapter::NativeStore;
pub use archive::ArchiveError;
pub use backend::{Handle, HandleId, PreferenceBackend};
pub use error::{BackendError, BackendResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use native::{NativeNumber, NativeValue};
