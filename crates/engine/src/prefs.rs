//! Path-addressed preferences
//!
//! [`Preferences`] combines the path parsers and tree operations from
//! `prefpath-core` with a [`NativeStore`]. Every mutation is a
//! read-modify-write of one whole root value:
//!
//! 1. the root value is read from the store and owned by the call,
//! 2. the operation mutates it in place,
//! 3. on success it is written back whole; on error it is dropped.
//!
//! Nothing else holds a reference to the tree between steps 1 and 3.
//! Two callers writing the same root key concurrently race at whole-value
//! granularity (last write wins). Callers on different root keys are
//! independent.
//!
//! Three path syntaxes address into a root value:
//!
//! | Methods | Syntax | Root key |
//! |---------|--------|----------|
//! | `get` / `set` / `delete` / `exists` | `root/a/0/~]` | first segment |
//! | `*_pointer` | `/a/0/-` | separate argument |
//! | `*_q` | `$.a[0]`, `$.a[*]`, `$.a[?(@.b == 1)]` | separate argument |

use crate::config::{BackendKind, PrefsConfig, CONFIG_FILE_NAME};
use prefpath_core::{
    cast, ops, parse_keypath, parse_pointer, parse_query, Error, FromValue, Path, Result,
    SegmentPolicy, Step, Timestamp, Value,
};
use prefpath_storage::{FileBackend, MemoryBackend, NativeStore, PreferenceBackend};
use std::collections::HashMap;
use std::path::Path as FsPath;
use std::sync::Arc;
use tracing::{debug, info};

/// Preference store addressed by paths
#[derive(Debug, Clone)]
pub struct Preferences {
    store: NativeStore,
    policy: SegmentPolicy,
}

/// A parsed address: root key, steps within it and the text used in errors
struct Target {
    key: String,
    path: Path,
    display: String,
}

impl Preferences {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Open the backend a config selects
    pub fn open(config: &PrefsConfig) -> Result<Self> {
        let policy = config.segment_policy()?;
        let backend: Arc<dyn PreferenceBackend> = match config.backend_kind()? {
            BackendKind::Memory => Arc::new(MemoryBackend::new()),
            BackendKind::File(dir) => Arc::new(FileBackend::new(dir.clone()).map_err(|e| {
                Error::internal()
                    .with_msg(format!("Failed to open data directory '{}'", dir.display()))
                    .with_source(e)
            })?),
        };
        info!(
            target: "prefpath::prefs",
            backend = backend.name(),
            policy = %policy,
            "Preferences opened"
        );
        Ok(Self::with_backend(backend).with_segment_policy(policy))
    }

    /// Open preferences in `dir`, configured by `dir/prefpath.toml`
    ///
    /// A default config is written on first open. A file backend without an
    /// explicit `data_dir` stores its collections in `dir`.
    pub fn open_dir(dir: &FsPath) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::internal()
                .with_msg(format!("Failed to create directory '{}'", dir.display()))
                .with_source(e)
        })?;
        let config_path = dir.join(CONFIG_FILE_NAME);
        PrefsConfig::write_default_if_missing(&config_path)?;

        let mut config = PrefsConfig::from_file(&config_path)?;
        if config.backend == "file" && config.data_dir.is_none() {
            config.data_dir = Some(dir.to_path_buf());
        }
        Self::open(&config)
    }

    /// Wrap an existing backend with the default segment policy
    pub fn with_backend(backend: Arc<dyn PreferenceBackend>) -> Self {
        Preferences {
            store: NativeStore::new(backend),
            policy: SegmentPolicy::default(),
        }
    }

    /// Process-local preferences
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Use `policy` for empty keypath segments
    pub fn with_segment_policy(mut self, policy: SegmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Empty keypath segment policy in effect
    pub fn segment_policy(&self) -> SegmentPolicy {
        self.policy
    }

    /// Underlying store adapter
    pub fn store(&self) -> &NativeStore {
        &self.store
    }

    // =========================================================================
    // Keypath operations
    // =========================================================================

    /// Read the value at a slash keypath
    pub fn get(&self, collection: &str, keypath: &str) -> Result<Value> {
        let target = self.keypath_target(collection, keypath)?;
        self.read_at(collection, &target)
    }

    /// Write a value at a slash keypath, creating intermediate containers
    pub fn set(&self, collection: &str, keypath: &str, value: impl Into<Value>) -> Result<()> {
        let target = self.keypath_target(collection, keypath)?;
        self.write_at(collection, &target, value.into())
    }

    /// Remove the value at a slash keypath; absent targets are not an error
    pub fn delete(&self, collection: &str, keypath: &str) -> Result<()> {
        let target = self.keypath_target(collection, keypath)?;
        self.delete_at(collection, &target)
    }

    /// Check whether a slash keypath addresses a value
    ///
    /// Only a malformed keypath is an error.
    pub fn exists(&self, collection: &str, keypath: &str) -> Result<bool> {
        let target = self.keypath_target(collection, keypath)?;
        self.exists_at(collection, &target)
    }

    // =========================================================================
    // Query operations
    // =========================================================================

    /// Read the first value a query selects under `key`
    pub fn get_q(&self, collection: &str, key: &str, query: &str) -> Result<Value> {
        let target = query_target(collection, key, query)?;
        self.read_at(collection, &target)
    }

    /// Read every value a query selects under `key`
    ///
    /// An absent root key selects nothing.
    pub fn get_q_all(&self, collection: &str, key: &str, query: &str) -> Result<Vec<Value>> {
        let target = query_target(collection, key, query)?;
        debug!(target: "prefpath::prefs", collection, key, path = %target.display, "get_all");
        let root = match self.store.get(collection, key) {
            Ok(root) => root,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(target.context(collection, e)),
        };
        ops::get_all(&root, &target.path)
            .map_err(|e| target.context(collection, e.into()))
    }

    /// Write a value at a query path under `key`
    ///
    /// Wildcards and filters are rejected.
    pub fn set_q(
        &self,
        collection: &str,
        key: &str,
        query: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let target = query_target(collection, key, query)?;
        self.write_at(collection, &target, value.into())
    }

    /// Remove every value a query selects under `key`
    pub fn delete_q(&self, collection: &str, key: &str, query: &str) -> Result<()> {
        let target = query_target(collection, key, query)?;
        self.delete_at(collection, &target)
    }

    /// Check whether a query selects anything under `key`
    pub fn exists_q(&self, collection: &str, key: &str, query: &str) -> Result<bool> {
        let target = query_target(collection, key, query)?;
        self.exists_at(collection, &target)
    }

    // =========================================================================
    // JSON Pointer operations
    // =========================================================================

    /// Read the value at a JSON Pointer under `key`
    pub fn get_pointer(&self, collection: &str, key: &str, pointer: &str) -> Result<Value> {
        let target = pointer_target(collection, key, pointer)?;
        self.read_at(collection, &target)
    }

    /// Write a value at a JSON Pointer under `key`
    pub fn set_pointer(
        &self,
        collection: &str,
        key: &str,
        pointer: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let target = pointer_target(collection, key, pointer)?;
        self.write_at(collection, &target, value.into())
    }

    /// Remove the value at a JSON Pointer under `key`
    pub fn delete_pointer(&self, collection: &str, key: &str, pointer: &str) -> Result<()> {
        let target = pointer_target(collection, key, pointer)?;
        self.delete_at(collection, &target)
    }

    /// Check whether a JSON Pointer under `key` addresses a value
    pub fn exists_pointer(&self, collection: &str, key: &str, pointer: &str) -> Result<bool> {
        let target = pointer_target(collection, key, pointer)?;
        self.exists_at(collection, &target)
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Read the value at a keypath as `T`, with no coercion between kinds
    pub fn get_as<T: FromValue>(&self, collection: &str, keypath: &str) -> Result<T> {
        let target = self.keypath_target(collection, keypath)?;
        let value = self.read_at(collection, &target)?;
        cast::<T>(value).map_err(|e| target.context(collection, e.into()))
    }

    /// Read the first value a query selects as `T`
    pub fn get_q_as<T: FromValue>(&self, collection: &str, key: &str, query: &str) -> Result<T> {
        let target = query_target(collection, key, query)?;
        let value = self.read_at(collection, &target)?;
        cast::<T>(value).map_err(|e| target.context(collection, e.into()))
    }

    /// Read a string
    pub fn get_str(&self, collection: &str, keypath: &str) -> Result<String> {
        self.get_as(collection, keypath)
    }

    /// Read a 64-bit integer
    pub fn get_int(&self, collection: &str, keypath: &str) -> Result<i64> {
        self.get_as(collection, keypath)
    }

    /// Read a 64-bit float; integers are not converted
    pub fn get_float(&self, collection: &str, keypath: &str) -> Result<f64> {
        self.get_as(collection, keypath)
    }

    /// Read a boolean
    pub fn get_bool(&self, collection: &str, keypath: &str) -> Result<bool> {
        self.get_as(collection, keypath)
    }

    /// Read a timestamp
    pub fn get_timestamp(&self, collection: &str, keypath: &str) -> Result<Timestamp> {
        self.get_as(collection, keypath)
    }

    /// Read a byte blob
    pub fn get_bytes(&self, collection: &str, keypath: &str) -> Result<Vec<u8>> {
        self.get_as(collection, keypath)
    }

    /// Read a list
    pub fn get_array(&self, collection: &str, keypath: &str) -> Result<Vec<Value>> {
        self.get_as(collection, keypath)
    }

    /// Read a map
    pub fn get_object(&self, collection: &str, keypath: &str) -> Result<HashMap<String, Value>> {
        self.get_as(collection, keypath)
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Root keys stored in a collection, sorted
    pub fn list_keys(&self, collection: &str) -> Result<Vec<String>> {
        self.store.list_keys(collection)
    }

    // =========================================================================
    // Read-modify-write
    // =========================================================================

    fn keypath_target(&self, collection: &str, keypath: &str) -> Result<Target> {
        let kp = parse_keypath(keypath, self.policy)
            .map_err(|e| Error::from(e).in_context(collection, keypath, None))?;
        let display = kp.relative().to_string();
        let (key, path) = kp.into_parts();
        Ok(Target { key, path, display })
    }

    fn read_at(&self, collection: &str, target: &Target) -> Result<Value> {
        debug!(
            target: "prefpath::prefs",
            collection,
            key = %target.key,
            path = %target.display,
            "get"
        );
        let root = self
            .store
            .get(collection, &target.key)
            .map_err(|e| target.context(collection, e))?;
        if target.path.is_root() {
            return Ok(root);
        }
        ops::get(root, &target.path)
            .map_err(|e| target.context(collection, e.into()))
    }

    fn write_at(&self, collection: &str, target: &Target, value: Value) -> Result<()> {
        debug!(
            target: "prefpath::prefs",
            collection,
            key = %target.key,
            path = %target.display,
            kind = %value.kind(),
            "set"
        );
        if target.path.is_root() {
            return self
                .store
                .set(collection, &target.key, &value)
                .map_err(|e| target.context(collection, e));
        }

        let mut root = match self.store.get(collection, &target.key) {
            Ok(root) => root,
            Err(e) if e.is_not_found() => empty_root_for(&target.path),
            Err(e) => return Err(target.context(collection, e)),
        };
        ops::set(&mut root, &target.path, value)
            .map_err(|e| target.context(collection, e.into()))?;
        self.store
            .set(collection, &target.key, &root)
            .map_err(|e| target.context(collection, e))
    }

    fn delete_at(&self, collection: &str, target: &Target) -> Result<()> {
        debug!(
            target: "prefpath::prefs",
            collection,
            key = %target.key,
            path = %target.display,
            "delete"
        );
        if target.path.is_root() {
            return self
                .store
                .delete(collection, &target.key)
                .map_err(|e| target.context(collection, e));
        }

        let mut root = match self.store.get(collection, &target.key) {
            Ok(root) => root,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(target.context(collection, e)),
        };
        ops::delete(&mut root, &target.path)
            .map_err(|e| target.context(collection, e.into()))?;
        self.store
            .set(collection, &target.key, &root)
            .map_err(|e| target.context(collection, e))
    }

    fn exists_at(&self, collection: &str, target: &Target) -> Result<bool> {
        debug!(
            target: "prefpath::prefs",
            collection,
            key = %target.key,
            path = %target.display,
            "exists"
        );
        if target.path.is_root() {
            return self
                .store
                .exists(collection, &target.key)
                .map_err(|e| target.context(collection, e));
        }
        match self.store.get(collection, &target.key) {
            Ok(root) => Ok(ops::exists(root, &target.path)),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(target.context(collection, e)),
        }
    }
}

impl Target {
    fn context(&self, collection: &str, e: Error) -> Error {
        let path = (!self.display.is_empty()).then_some(self.display.as_str());
        e.in_context(collection, &self.key, path)
    }
}

fn query_target(collection: &str, key: &str, query: &str) -> Result<Target> {
    let path = parse_query(query)
        .map_err(|e| Error::from(e).in_context(collection, key, Some(query)))?;
    Ok(Target {
        key: key.to_string(),
        path,
        display: query.to_string(),
    })
}

fn pointer_target(collection: &str, key: &str, pointer: &str) -> Result<Target> {
    let path = parse_pointer(pointer)
        .map_err(|e| Error::from(e).in_context(collection, key, Some(pointer)))?;
    Ok(Target {
        key: key.to_string(),
        path,
        display: pointer.to_string(),
    })
}

/// Container a fresh root key starts from, chosen by the first step
fn empty_root_for(path: &Path) -> Value {
    match path.steps().first() {
        Some(Step::Index(_) | Step::Append) => Value::array(),
        _ => Value::object(),
    }
}
