//! In-memory preference backend
//!
//! Collections live in a `RwLock`ed map for the lifetime of the backend.
//! Each handle stages its own writes until `synchronize`. The backend
//! counts open handles and can be told to refuse synchronization, which
//! tests use to check handle lifetimes and sync-failure reporting.

use crate::backend::{HandleId, PreferenceBackend};
use crate::error::{BackendError, BackendResult};
use crate::native::NativeValue;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::warn;

type Collection = BTreeMap<String, NativeValue>;

#[derive(Debug)]
struct OpenHandle {
    collection: String,
    pending: HashMap<String, Option<NativeValue>>,
}

/// Preference backend held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Collection>>,
    handles: Mutex<HashMap<HandleId, OpenHandle>>,
    next_handle: AtomicU64,
    fail_sync: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles acquired and not yet released
    pub fn open_handles(&self) -> usize {
        self.handles.lock().len()
    }

    /// Make every following `synchronize` return `false`
    pub fn fail_synchronize(&self, fail: bool) {
        self.fail_sync.store(fail, Ordering::SeqCst);
    }

    fn collection_of(&self, handle: HandleId) -> BackendResult<String> {
        self.handles
            .lock()
            .get(&handle)
            .map(|h| h.collection.clone())
            .ok_or(BackendError::UnknownHandle(handle))
    }
}

impl PreferenceBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn acquire(&self, collection: &str) -> BackendResult<HandleId> {
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst) + 1;
        self.handles.lock().insert(
            id,
            OpenHandle {
                collection: collection.to_string(),
                pending: HashMap::new(),
            },
        );
        Ok(id)
    }

    fn copy_value(&self, handle: HandleId, key: &str) -> BackendResult<Option<NativeValue>> {
        let collection = {
            let handles = self.handles.lock();
            let open = handles.get(&handle).ok_or(BackendError::UnknownHandle(handle))?;
            if let Some(staged) = open.pending.get(key) {
                return Ok(staged.clone());
            }
            open.collection.clone()
        };

        Ok(self
            .collections
            .read()
            .get(&collection)
            .and_then(|c| c.get(key))
            .cloned())
    }

    fn set_value(
        &self,
        handle: HandleId,
        key: &str,
        value: Option<NativeValue>,
    ) -> BackendResult<()> {
        let mut handles = self.handles.lock();
        let open = handles
            .get_mut(&handle)
            .ok_or(BackendError::UnknownHandle(handle))?;
        open.pending.insert(key.to_string(), value);
        Ok(())
    }

    fn synchronize(&self, handle: HandleId) -> BackendResult<bool> {
        let (collection, pending) = {
            let mut handles = self.handles.lock();
            let open = handles
                .get_mut(&handle)
                .ok_or(BackendError::UnknownHandle(handle))?;
            (open.collection.clone(), std::mem::take(&mut open.pending))
        };

        if self.fail_sync.load(Ordering::SeqCst) {
            warn!(
                target: "prefpath::adapter",
                collection = %collection,
                dropped = pending.len(),
                "Synchronize refused"
            );
            return Ok(false);
        }

        let mut collections = self.collections.write();
        let stored = collections.entry(collection).or_default();
        for (key, value) in pending {
            match value {
                Some(v) => {
                    stored.insert(key, v);
                }
                None => {
                    stored.remove(&key);
                }
            }
        }
        Ok(true)
    }

    fn copy_key_list(&self, handle: HandleId) -> BackendResult<Vec<String>> {
        let collection = self.collection_of(handle)?;
        Ok(self
            .collections
            .read()
            .get(&collection)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn release(&self, handle: HandleId) {
        if self.handles.lock().remove(&handle).is_none() {
            warn!(target: "prefpath::adapter", handle, "Release of unknown handle");
        }
    }
}
