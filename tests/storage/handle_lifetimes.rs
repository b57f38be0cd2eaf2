//! Every backend handle is released exactly once, whatever the outcome

use crate::common::*;

#[test]
fn test_no_handles_leak_on_success() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k/a", 1).unwrap();
    t.prefs.get(APP, "k/a").unwrap();
    t.prefs.exists(APP, "k/a").unwrap();
    t.prefs.get_q_all(APP, "k", "$.*").unwrap();
    t.prefs.list_keys(APP).unwrap();
    t.prefs.delete(APP, "k/a").unwrap();
    t.prefs.delete(APP, "k").unwrap();
    assert_eq!(t.backend.open_handles(), 0);
}

#[test]
fn test_no_handles_leak_on_errors() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "s", "scalar").unwrap();

    assert!(t.prefs.get(APP, "missing").is_err());
    assert!(t.prefs.get(APP, "s/x").is_err());
    assert!(t.prefs.set(APP, "s/x", 1).is_err());
    assert!(t.prefs.get_int(APP, "s").is_err());
    assert!(t.prefs.set(APP, "k", Value::Array(vec![Value::Null])).is_err());
    assert!(!t.prefs.exists(APP, "s/x/y").unwrap());

    t.backend.fail_synchronize(true);
    assert!(t.prefs.set(APP, "k", 1).is_err());
    assert!(t.prefs.delete(APP, "s").is_err());

    assert_eq!(t.backend.open_handles(), 0);
}

#[test]
fn test_failed_delete_sync_keeps_value() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", json!({"a": 1, "b": 2})).unwrap();
    t.backend.fail_synchronize(true);

    let err = t.prefs.delete(APP, "k/a").unwrap_err();
    assert!(err.is_internal());

    t.backend.fail_synchronize(false);
    assert_eq!(t.prefs.get(APP, "k").unwrap(), v(json!({"a": 1, "b": 2})));
}
