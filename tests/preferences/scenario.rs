//! End-to-end walk through a user profile

use crate::common::*;

fn run_profile_scenario(prefs: &Preferences) {
    prefs.set(APP, "user/profile/name", "Ada").unwrap();
    prefs.set(APP, "user/profile/age", 30).unwrap();

    assert_eq!(prefs.get(APP, "user/profile/name").unwrap(), Value::from("Ada"));
    assert_eq!(
        prefs.get(APP, "user").unwrap(),
        v(json!({"profile": {"name": "Ada", "age": 30}}))
    );

    prefs.delete(APP, "user/profile/age").unwrap();
    assert!(!prefs.exists(APP, "user/profile/age").unwrap());
    assert_eq!(prefs.get(APP, "user/profile/name").unwrap(), Value::from("Ada"));
    assert_eq!(prefs.list_keys(APP).unwrap(), vec!["user"]);
}

#[test]
fn test_profile_scenario_memory() {
    let t = MemoryPrefs::new();
    run_profile_scenario(&t.prefs);
    assert_eq!(t.backend.open_handles(), 0);
}

#[test]
fn test_profile_scenario_file() {
    let t = FilePrefs::new();
    run_profile_scenario(&t.prefs);

    let reopened = t.reopen();
    assert_eq!(
        reopened.get(APP, "user").unwrap(),
        v(json!({"profile": {"name": "Ada"}}))
    );
}

#[test]
fn test_collections_are_independent() {
    let t = MemoryPrefs::new();
    t.prefs.set("com.example.one", "k", 1).unwrap();
    t.prefs.set("com.example.two", "k", 2).unwrap();
    assert_eq!(t.prefs.get_int("com.example.one", "k").unwrap(), 1);
    assert_eq!(t.prefs.get_int("com.example.two", "k").unwrap(), 2);
}
