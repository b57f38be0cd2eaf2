//! Concurrent callers

use crate::common::*;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const WRITES: usize = 25;

#[test]
fn test_different_root_keys_are_independent_memory() {
    let t = MemoryPrefs::new();
    let prefs = Arc::new(t.prefs.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let prefs = Arc::clone(&prefs);
            thread::spawn(move || {
                let key = format!("worker{}", i);
                for n in 0..WRITES {
                    prefs.set(APP, &format!("{}/items/~]", key), n).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    for i in 0..THREADS {
        let items = prefs.get_array(APP, &format!("worker{}/items", i)).unwrap();
        assert_eq!(items.len(), WRITES);
        assert_eq!(items[WRITES - 1], Value::Int((WRITES - 1) as i64));
    }
    assert_eq!(t.backend.open_handles(), 0);
}

#[test]
fn test_different_root_keys_are_independent_file() {
    let t = FilePrefs::new();

    thread::scope(|s| {
        for i in 0..THREADS {
            let prefs = t.prefs.clone();
            s.spawn(move || {
                for n in 0..WRITES {
                    prefs
                        .set(APP, &format!("worker{}/count", i), n as i64)
                        .unwrap();
                }
            });
        }
    });

    let reopened = t.reopen();
    assert_eq!(reopened.list_keys(APP).unwrap().len(), THREADS);
    for i in 0..THREADS {
        assert_eq!(
            reopened.get_int(APP, &format!("worker{}/count", i)).unwrap(),
            (WRITES - 1) as i64
        );
    }
}

#[test]
fn test_same_root_key_is_last_write_wins() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "shared", json!({})).unwrap();

    thread::scope(|s| {
        for i in 0..THREADS {
            let prefs = t.prefs.clone();
            s.spawn(move || {
                prefs.set(APP, &format!("shared/f{}", i), i as i64).unwrap();
            });
        }
    });

    // Updates may be lost, but the stored value is always one whole write.
    let shared = t.prefs.get_object(APP, "shared").unwrap();
    assert!(!shared.is_empty());
    assert!(shared.len() <= THREADS);
    for (k, v) in shared {
        let i: i64 = k.trim_start_matches('f').parse().unwrap();
        assert_eq!(v, Value::Int(i));
    }
}
