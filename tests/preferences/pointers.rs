//! JSON Pointer addressing within one root key

use crate::common::*;

#[test]
fn test_pointer_get_set() {
    let t = MemoryPrefs::new();
    t.prefs.set_pointer(APP, "k", "/a/b", 1).unwrap();
    t.prefs.set_pointer(APP, "k", "/list/-", "x").unwrap();
    t.prefs.set_pointer(APP, "k", "/list/-", "y").unwrap();

    assert_eq!(t.prefs.get_pointer(APP, "k", "/a/b").unwrap(), Value::Int(1));
    assert_eq!(t.prefs.get_pointer(APP, "k", "/list/1").unwrap(), Value::from("y"));
    assert_eq!(
        t.prefs.get_pointer(APP, "k", "").unwrap(),
        v(json!({"a": {"b": 1}, "list": ["x", "y"]}))
    );
}

#[test]
fn test_pointer_escapes() {
    let t = MemoryPrefs::new();
    t.prefs.set_pointer(APP, "k", "/a~1b", 1).unwrap();
    assert_eq!(t.prefs.get(APP, "k").unwrap(), v(json!({"a/b": 1})));
}

#[test]
fn test_pointer_index_on_fresh_root_creates_list_but_fails_bounds() {
    let t = MemoryPrefs::new();
    let err = t.prefs.set_pointer(APP, "k", "/0", 1).unwrap_err();
    assert!(err.is_invalid_path());
    assert!(!t.prefs.exists(APP, "k").unwrap());
}

#[test]
fn test_pointer_digit_token_on_map_is_type_mismatch() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", json!({"0": "zero"})).unwrap();
    let err = t.prefs.get_pointer(APP, "k", "/0").unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_pointer_delete_and_exists() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", json!({"list": [1, 2, 3]})).unwrap();
    t.prefs.delete_pointer(APP, "k", "/list/0").unwrap();
    assert_eq!(t.prefs.get_pointer(APP, "k", "/list").unwrap(), v(json!([2, 3])));
    assert!(t.prefs.exists_pointer(APP, "k", "/list/1").unwrap());
    assert!(!t.prefs.exists_pointer(APP, "k", "/list/2").unwrap());

    t.prefs.delete_pointer(APP, "k", "").unwrap();
    assert!(!t.prefs.exists(APP, "k").unwrap());
}

#[test]
fn test_pointer_without_leading_slash_is_invalid() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", 1).unwrap();
    let err = t.prefs.exists_pointer(APP, "k", "a/b").unwrap_err();
    assert!(err.is_invalid_path());
    assert_eq!(err.key(), "k");
    assert_eq!(err.path(), Some("a/b"));
}
