//! Preference backend boundary
//!
//! [`PreferenceBackend`] has the shape of an OS preference API: a caller
//! acquires a handle for a collection, copies values out, stages writes,
//! synchronizes them to the store and finally releases the handle.
//!
//! [`Handle`] wraps that protocol in an RAII guard so a handle is released
//! exactly once on every exit path of the call that acquired it.

use crate::error::BackendResult;
use crate::native::NativeValue;
use std::fmt::Debug;
use tracing::trace;

/// Opaque handle id issued by a backend
pub type HandleId = u64;

/// Native preference store
///
/// Writes made through `set_value` are staged on the handle and become
/// visible to other handles only after a successful `synchronize`.
pub trait PreferenceBackend: Send + Sync + Debug {
    /// Short backend name, for logs
    fn name(&self) -> &'static str;

    /// Open a handle on a collection
    fn acquire(&self, collection: &str) -> BackendResult<HandleId>;

    /// Copy the value stored under `key`, if any
    fn copy_value(&self, handle: HandleId, key: &str) -> BackendResult<Option<NativeValue>>;

    /// Stage a write; `None` removes the key
    fn set_value(&self, handle: HandleId, key: &str, value: Option<NativeValue>)
        -> BackendResult<()>;

    /// Flush staged writes, returning `false` if the store refused them
    fn synchronize(&self, handle: HandleId) -> BackendResult<bool>;

    /// Copy the list of keys in the collection
    fn copy_key_list(&self, handle: HandleId) -> BackendResult<Vec<String>>;

    /// Release a handle, discarding any writes still staged on it
    fn release(&self, handle: HandleId);
}

/// Handle scoped to one call
#[derive(Debug)]
pub struct Handle<'a> {
    backend: &'a dyn PreferenceBackend,
    id: HandleId,
    collection: String,
}

impl<'a> Handle<'a> {
    /// Acquire a handle on `collection`
    pub fn acquire(backend: &'a dyn PreferenceBackend, collection: &str) -> BackendResult<Self> {
        let id = backend.acquire(collection)?;
        trace!(
            target: "prefpath::adapter",
            backend = backend.name(),
            collection,
            handle = id,
            "Handle acquired"
        );
        Ok(Handle {
            backend,
            id,
            collection: collection.to_string(),
        })
    }

    /// Backend-issued id
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Collection this handle is open on
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Copy the value stored under `key`
    pub fn copy_value(&self, key: &str) -> BackendResult<Option<NativeValue>> {
        self.backend.copy_value(self.id, key)
    }

    /// Stage a write
    pub fn set_value(&self, key: &str, value: Option<NativeValue>) -> BackendResult<()> {
        self.backend.set_value(self.id, key, value)
    }

    /// Flush staged writes
    pub fn synchronize(&self) -> BackendResult<bool> {
        self.backend.synchronize(self.id)
    }

    /// Copy the key list
    pub fn copy_key_list(&self) -> BackendResult<Vec<String>> {
        self.backend.copy_key_list(self.id)
    }
}

impl Drop for Handle<'_> {
    fn drop(&mut self) {
        self.backend.release(self.id);
        trace!(
            target: "prefpath::adapter",
            collection = %self.collection,
            handle = self.id,
            "Handle released"
        );
    }
}
