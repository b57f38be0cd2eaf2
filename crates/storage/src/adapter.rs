//! Native store adapter
//!
//! [`NativeStore`] is the only caller of a [`PreferenceBackend`]. Every
//! method acquires one [`Handle`] for the call, converts values with
//! [`crate::marshal`], and reports failures as [`prefpath_core::Error`]
//! with the collection and root key attached.

use crate::backend::{Handle, PreferenceBackend};
use crate::error::BackendError;
use crate::marshal::{from_native, to_native};
use prefpath_core::{Error, Result, Value};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Adapter between whole root values and a native backend
#[derive(Debug, Clone)]
pub struct NativeStore {
    backend: Arc<dyn PreferenceBackend>,
}

impl NativeStore {
    /// Wrap a backend
    pub fn new(backend: Arc<dyn PreferenceBackend>) -> Self {
        NativeStore { backend }
    }

    /// Underlying backend
    pub fn backend(&self) -> &Arc<dyn PreferenceBackend> {
        &self.backend
    }

    /// Read the whole value stored under `key`
    ///
    /// An absent key is `KeyNotFound`.
    pub fn get(&self, collection: &str, key: &str) -> Result<Value> {
        debug!(target: "prefpath::adapter", collection, key, "get");
        let handle = self.open(collection, key)?;
        let native = handle
            .copy_value(key)
            .map_err(|e| internal(collection, key, e))?
            .ok_or_else(|| {
                Error::key_not_found()
                    .with_collection(collection)
                    .with_key(key)
            })?;
        trace!(
            target: "prefpath::adapter",
            collection,
            key,
            native_type = native.type_name(),
            "Value copied"
        );
        Ok(from_native(native))
    }

    /// Replace the whole value stored under `key`
    ///
    /// `Null` removes the key.
    pub fn set(&self, collection: &str, key: &str, value: &Value) -> Result<()> {
        debug!(target: "prefpath::adapter", collection, key, kind = %value.kind(), "set");
        let native = if value.is_null() {
            None
        } else {
            Some(to_native(value).map_err(|e| internal(collection, key, e))?)
        };

        let handle = self.open(collection, key)?;
        handle
            .set_value(key, native)
            .map_err(|e| internal(collection, key, e))?;
        self.synchronize(&handle, key)
    }

    /// Remove `key`; absent keys are not an error
    pub fn delete(&self, collection: &str, key: &str) -> Result<()> {
        debug!(target: "prefpath::adapter", collection, key, "delete");
        let handle = self.open(collection, key)?;
        handle
            .set_value(key, None)
            .map_err(|e| internal(collection, key, e))?;
        self.synchronize(&handle, key)
    }

    /// Check whether `key` holds a value
    pub fn exists(&self, collection: &str, key: &str) -> Result<bool> {
        debug!(target: "prefpath::adapter", collection, key, "exists");
        let handle = self.open(collection, key)?;
        let value = handle
            .copy_value(key)
            .map_err(|e| internal(collection, key, e))?;
        Ok(value.is_some())
    }

    /// Root keys of a collection, sorted
    pub fn list_keys(&self, collection: &str) -> Result<Vec<String>> {
        debug!(target: "prefpath::adapter", collection, "list_keys");
        let handle = self.open(collection, "")?;
        let mut keys = handle
            .copy_key_list()
            .map_err(|e| internal(collection, "", e))?;
        keys.sort();
        Ok(keys)
    }

    fn open(&self, collection: &str, key: &str) -> Result<Handle<'_>> {
        Handle::acquire(self.backend.as_ref(), collection).map_err(|e| internal(collection, key, e))
    }

    fn synchronize(&self, handle: &Handle<'_>, key: &str) -> Result<()> {
        let collection = handle.collection();
        match handle.synchronize() {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(target: "prefpath::adapter", collection, key, "Synchronize failed");
                Err(Error::internal()
                    .with_collection(collection)
                    .with_key(key)
                    .with_msg("failed to synchronize preferences"))
            }
            Err(e) => Err(internal(collection, key, e)),
        }
    }
}

fn internal(collection: &str, key: &str, e: BackendError) -> Error {
    Error::internal()
        .with_collection(collection)
        .with_key(key)
        .with_msg(e.to_string())
        .with_source(e)
}
