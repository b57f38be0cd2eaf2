//! JSONPath-subset queries within one root key

use crate::common::*;

fn seed(t: &MemoryPrefs) {
    t.prefs
        .set(
            APP,
            "pets",
            json!({
                "list": [
                    {"name": "Tom", "kind": "cat", "meta": {"age": 4}},
                    {"name": "Rex", "kind": "dog", "meta": {"age": 7}},
                    {"name": "Kit", "kind": "cat", "meta": {"age": 1}}
                ],
                "owner": "Ada"
            }),
        )
        .unwrap();
}

#[test]
fn test_get_q_field_and_index() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert_eq!(t.prefs.get_q(APP, "pets", "$.owner").unwrap(), Value::from("Ada"));
    assert_eq!(
        t.prefs.get_q(APP, "pets", "$.list[1].name").unwrap(),
        Value::from("Rex")
    );
    assert_eq!(
        t.prefs.get_q(APP, "pets", "list[2]['name']").unwrap(),
        Value::from("Kit")
    );
}

#[test]
fn test_get_q_root() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "k", 5).unwrap();
    assert_eq!(t.prefs.get_q(APP, "k", "$").unwrap(), Value::Int(5));
    assert_eq!(t.prefs.get_q(APP, "k", "").unwrap(), Value::Int(5));
}

#[test]
fn test_get_q_wildcard_returns_first_match() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert_eq!(
        t.prefs.get_q(APP, "pets", "$.list[*].name").unwrap(),
        Value::from("Tom")
    );
}

#[test]
fn test_get_q_all_filter() {
    let t = MemoryPrefs::new();
    seed(&t);
    let cats = t
        .prefs
        .get_q_all(APP, "pets", "$.list[?(@.kind == 'cat')].name")
        .unwrap();
    assert_eq!(cats, vec![Value::from("Tom"), Value::from("Kit")]);

    let old = t
        .prefs
        .get_q_all(APP, "pets", "$.list[?(@.meta.age == 7)].name")
        .unwrap();
    assert_eq!(old, vec![Value::from("Rex")]);
}

#[test]
fn test_get_q_all_no_match_is_empty() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert!(t
        .prefs
        .get_q_all(APP, "pets", "$.list[?(@.kind == 'fish')]")
        .unwrap()
        .is_empty());
    assert!(t.prefs.get_q_all(APP, "absent", "$.x").unwrap().is_empty());
}

#[test]
fn test_get_q_empty_match_is_not_found() {
    let t = MemoryPrefs::new();
    seed(&t);
    let err = t
        .prefs
        .get_q(APP, "pets", "$.list[?(@.kind == 'fish')]")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.path(), Some("$.list[?(@.kind == 'fish')]"));
}

#[test]
fn test_no_numeric_coercion_in_filter() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert!(t
        .prefs
        .get_q_all(APP, "pets", "$.list[?(@.meta.age == 4.0)]")
        .unwrap()
        .is_empty());
}

#[test]
fn test_exists_q() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert!(t.prefs.exists_q(APP, "pets", "$.list[?(@.kind == 'dog')]").unwrap());
    assert!(!t.prefs.exists_q(APP, "pets", "$.list[?(@.kind == 'cow')]").unwrap());
    assert!(!t.prefs.exists_q(APP, "pets", "$.owner.name").unwrap());
    assert!(t.prefs.exists_q(APP, "pets", "$.list[").is_err());
}

#[test]
fn test_delete_q_filter_removes_all_matches() {
    let t = MemoryPrefs::new();
    seed(&t);
    t.prefs
        .delete_q(APP, "pets", "$.list[?(@.kind == 'cat')]")
        .unwrap();
    assert_eq!(
        t.prefs.get_q(APP, "pets", "$.list").unwrap(),
        v(json!([{"name": "Rex", "kind": "dog", "meta": {"age": 7}}]))
    );
}

#[test]
fn test_delete_q_wildcard_field() {
    let t = MemoryPrefs::new();
    seed(&t);
    t.prefs.delete_q(APP, "pets", "$.list[*].meta").unwrap();
    assert_eq!(
        t.prefs.get_q_all(APP, "pets", "$.list[*].name").unwrap().len(),
        3
    );
    assert!(!t.prefs.exists_q(APP, "pets", "$.list[*].meta").unwrap());
}

#[test]
fn test_delete_q_nested_lists() {
    let t = MemoryPrefs::new();
    t.prefs
        .set(APP, "m", json!([[1, 0, 1], [0, 0], [1]]))
        .unwrap();
    t.prefs.delete_q(APP, "m", "$[*][?(@ == 0)]").unwrap();
    assert_eq!(t.prefs.get(APP, "m").unwrap(), v(json!([[1, 1], [], [1]])));
}

#[test]
fn test_delete_q_no_match_is_noop() {
    let t = MemoryPrefs::new();
    seed(&t);
    t.prefs
        .delete_q(APP, "pets", "$.list[?(@.kind == 'fish')]")
        .unwrap();
    assert_eq!(t.prefs.get_q_all(APP, "pets", "$.list[*]").unwrap().len(), 3);
}

#[test]
fn test_set_q() {
    let t = MemoryPrefs::new();
    seed(&t);
    t.prefs.set_q(APP, "pets", "$.list[0].name", "Thomas").unwrap();
    t.prefs.set_q(APP, "pets", "$.tags[]", "indoor").unwrap();
    assert_eq!(
        t.prefs.get_q(APP, "pets", "$.list[0].name").unwrap(),
        Value::from("Thomas")
    );
    assert_eq!(t.prefs.get_q(APP, "pets", "$.tags").unwrap(), v(json!(["indoor"])));

    let err = t
        .prefs
        .set_q(APP, "pets", "$.list[?(@.kind == 'cat')].name", "x")
        .unwrap_err();
    assert!(err.is_invalid_path());
}

#[test]
fn test_malformed_queries() {
    let t = MemoryPrefs::new();
    seed(&t);
    for query in ["$.list[0", "$.list[?(@.kind == 'cat'", "$.", "$.a]", "$.list[x]"] {
        let err = t.prefs.get_q(APP, "pets", query).unwrap_err();
        assert!(err.is_invalid_path(), "{} should be invalid", query);
    }
}
