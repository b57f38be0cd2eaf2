//! Slash keypath addressing

use crate::common::*;

#[test]
fn test_numeric_segment_indexes_list() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", json!({"list": ["a", "b"]})).unwrap();
    assert_eq!(t.prefs.get(APP, "k/list/1").unwrap(), Value::from("b"));

    t.prefs.set(APP, "k/list/0", "z").unwrap();
    assert_eq!(t.prefs.get(APP, "k/list").unwrap(), v(json!(["z", "b"])));
}

#[test]
fn test_numeric_segment_is_map_key_on_maps() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k/2024/total", 5).unwrap();
    assert_eq!(t.prefs.get(APP, "k").unwrap(), v(json!({"2024": {"total": 5}})));
}

#[test]
fn test_escaped_segments() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k/a~1b/c~0d", 1).unwrap();
    assert_eq!(t.prefs.get(APP, "k").unwrap(), v(json!({"a/b": {"c~d": 1}})));
    assert!(t.prefs.exists(APP, "k/a~1b/c~0d").unwrap());
}

#[test]
fn test_invalid_escape_is_invalid_path() {
    let t = MemoryPrefs::new();
    let err = t.prefs.get(APP, "k/a~2").unwrap_err();
    assert!(err.is_invalid_path());
    assert_eq!(err.collection(), APP);
}

#[test]
fn test_append_as_root_key_is_invalid() {
    let t = MemoryPrefs::new();
    assert!(t.prefs.set(APP, "~]", 1).unwrap_err().is_invalid_path());
}

#[test]
fn test_get_append_marker_is_not_found() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", json!([1])).unwrap();
    assert!(t.prefs.get(APP, "k/~]").unwrap_err().is_not_found());
}

#[test]
fn test_delete_through_missing_intermediate_is_noop() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", json!({"a": 1})).unwrap();
    t.prefs.delete(APP, "k/b/c/d").unwrap();
    assert_eq!(t.prefs.get(APP, "k").unwrap(), v(json!({"a": 1})));
}

#[test]
fn test_missing_key_error_message() {
    let t = MemoryPrefs::new();
    let err = t.prefs.get(APP, "missing").unwrap_err();
    assert_eq!(err.to_string(), format!("key not found: missing [{}]", APP));
}

#[test]
fn test_path_length_limit() {
    let t = MemoryPrefs::new();
    let long = format!("k/{}", vec!["a"; prefpath_core::MAX_PATH_LENGTH + 1].join("/"));
    assert!(t.prefs.set(APP, &long, 1).unwrap_err().is_invalid_path());
}
