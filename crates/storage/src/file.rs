//! File-backed preference backend
//!
//! Each collection is one archive file, `<collection>.prefs`, under the
//! backend's directory. The file holds a dictionary of root keys.
//!
//! Handles stage writes in memory. `synchronize` takes the collection's lock,
//! re-reads the file, applies only that handle's staged keys and replaces the
//! file atomically (write temp, fsync, rename, fsync directory). Two handles
//! writing different keys of one collection therefore never clobber each
//! other; two handles writing the same key resolve last-write-wins.

use crate::archive;
use crate::backend::{HandleId, PreferenceBackend};
use crate::error::{BackendError, BackendResult};
use crate::native::NativeValue;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Extension of collection files
pub const COLLECTION_EXTENSION: &str = "prefs";

type Collection = BTreeMap<String, NativeValue>;

#[derive(Debug)]
struct OpenHandle {
    collection: String,
    pending: HashMap<String, Option<NativeValue>>,
}

/// Preference backend storing one archive file per collection
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    handles: Mutex<HashMap<HandleId, OpenHandle>>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    next_handle: AtomicU64,
}

impl FileBackend {
    /// Open a backend rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> BackendResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        info!(target: "prefpath::file", dir = ?dir, "File backend opened");
        Ok(FileBackend {
            dir,
            handles: Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(0),
        })
    }

    /// Directory holding the collection files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `collection`
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", file_stem(collection), COLLECTION_EXTENSION))
    }

    fn collection_of(&self, handle: HandleId) -> BackendResult<String> {
        self.handles
            .lock()
            .get(&handle)
            .map(|h| h.collection.clone())
            .ok_or(BackendError::UnknownHandle(handle))
    }

    fn lock_for(&self, collection: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(collection.to_string())
            .or_default()
            .clone()
    }

    fn load(&self, collection: &str) -> BackendResult<Collection> {
        let path = self.collection_path(collection);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Collection::new()),
            Err(e) => return Err(e.into()),
        };
        match archive::decode(&bytes)? {
            NativeValue::Dictionary(dict) => Ok(dict),
            _ => Err(BackendError::NotADictionary(collection.to_string())),
        }
    }

    fn persist(&self, collection: &str, dict: Collection) -> BackendResult<()> {
        let path = self.collection_path(collection);
        let temp_path = path.with_extension("tmp");
        let bytes = archive::encode(&NativeValue::Dictionary(dict))?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &path)?;

        if let Some(parent) = path.parent() {
            if parent.exists() {
                let dir = File::open(parent)?;
                dir.sync_all()?;
            }
        }
        Ok(())
    }
}

impl PreferenceBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
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
        Ok(self.load(&collection)?.remove(key))
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
        if pending.is_empty() {
            return Ok(true);
        }

        let lock = self.lock_for(&collection);
        let _guard = lock.lock();

        let mut dict = self.load(&collection)?;
        let changed = pending.len();
        for (key, value) in pending {
            match value {
                Some(v) => {
                    dict.insert(key, v);
                }
                None => {
                    dict.remove(&key);
                }
            }
        }
        self.persist(&collection, dict)?;
        debug!(
            target: "prefpath::file",
            collection = %collection,
            changed,
            "Collection synchronized"
        );
        Ok(true)
    }

    fn copy_key_list(&self, handle: HandleId) -> BackendResult<Vec<String>> {
        let collection = self.collection_of(handle)?;
        Ok(self.load(&collection)?.into_keys().collect())
    }

    fn release(&self, handle: HandleId) {
        if self.handles.lock().remove(&handle).is_none() {
            warn!(target: "prefpath::file", handle, "Release of unknown handle");
        }
    }
}

/// File-name-safe form of a collection id
///
/// ASCII letters, digits, `.`, `_` and `-` pass through; every other byte is
/// written as `%XX`.
fn file_stem(collection: &str) -> String {
    let mut out = String::with_capacity(collection.len());
    for b in collection.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}
