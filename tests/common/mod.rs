//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from any suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::{Arc, Once};
use std::time::Duration;

pub use prefpath::{
    Error, ErrorKind, FileBackend, MemoryBackend, PreferenceBackend, Preferences, SegmentPolicy,
    Timestamp, Value, ValueKind,
};
pub use serde_json::json;
pub use tempfile::TempDir;

/// Collection id used by most tests.
pub const APP: &str = "com.example.prefpath-tests";

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a fmt subscriber writing through the test harness, once per binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// Preferences over a memory backend, with the backend kept for inspection.
pub struct MemoryPrefs {
    pub prefs: Preferences,
    pub backend: Arc<MemoryBackend>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        init_tracing();
        let backend = Arc::new(MemoryBackend::new());
        let prefs = Preferences::with_backend(backend.clone());
        MemoryPrefs { prefs, backend }
    }

    pub fn with_policy(policy: SegmentPolicy) -> Self {
        let mut p = Self::new();
        p.prefs = p.prefs.with_segment_policy(policy);
        p
    }
}

/// Preferences over a file backend in a temporary directory.
pub struct FilePrefs {
    pub prefs: Preferences,
    pub dir: TempDir,
}

impl FilePrefs {
    pub fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().expect("temp dir");
        let prefs = Self::open_in(&dir);
        FilePrefs { prefs, dir }
    }

    /// A second, independent instance over the same directory.
    pub fn reopen(&self) -> Preferences {
        Self::open_in(&self.dir)
    }

    fn open_in(dir: &TempDir) -> Preferences {
        let backend = FileBackend::new(dir.path()).expect("file backend");
        Preferences::with_backend(Arc::new(backend))
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Float tolerance for round-trip comparisons.
pub const FLOAT_TOLERANCE: f64 = 1e-10;

/// Timestamp tolerance for round-trip comparisons.
pub const TIMESTAMP_TOLERANCE: Duration = Duration::from_micros(1);

/// Type-aware equality: timestamps within 1µs, floats within 1e-10,
/// recursive over lists and maps.
pub fn values_equal_approx(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => (x - y).abs() <= FLOAT_TOLERANCE,
        (Value::Timestamp(x), Value::Timestamp(y)) => x.is_within(*y, TIMESTAMP_TOLERANCE),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| values_equal_approx(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal_approx(v, w)))
        }
        _ => a == b,
    }
}

/// Assert two values are equal under [`values_equal_approx`].
pub fn assert_values_approx(actual: &Value, expected: &Value) {
    assert!(
        values_equal_approx(actual, expected),
        "values differ:\n  actual:   {}\n  expected: {}",
        actual,
        expected
    );
}

/// Build a value from a JSON literal.
pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}
