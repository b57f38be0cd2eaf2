//! Empty keypath segments: the default `skip` policy and the `reject` alternative

use crate::common::*;

#[test]
fn test_skip_policy_drops_empty_segments() {
    let t = MemoryPrefs::new();
    assert_eq!(t.prefs.segment_policy(), SegmentPolicy::Skip);

    t.prefs.set(APP, "a//b///c", 1).unwrap();
    assert_eq!(t.prefs.get(APP, "a/b/c").unwrap(), Value::Int(1));
    assert_eq!(t.prefs.get(APP, "/a/b/c/").unwrap(), Value::Int(1));
    assert!(t.prefs.exists(APP, "a//b//c").unwrap());
}

#[test]
fn test_skip_policy_trailing_slash_addresses_root() {
    let t = MemoryPrefs::new();
    t.prefs.set(APP, "a/b", 1).unwrap();
    assert_eq!(t.prefs.get(APP, "a/").unwrap(), v(json!({"b": 1})));
}

#[test]
fn test_skip_policy_all_empty_is_invalid() {
    let t = MemoryPrefs::new();
    for keypath in ["", "/", "///"] {
        let err = t.prefs.get(APP, keypath).unwrap_err();
        assert!(err.is_invalid_path(), "{:?} should be invalid", keypath);
    }
}

#[test]
fn test_reject_policy_errors_on_empty_segments() {
    let t = MemoryPrefs::with_policy(SegmentPolicy::Reject);

    for keypath in ["a//b", "a/b//", "//a", "", "/", "///"] {
        let err = t.prefs.set(APP, keypath, 1).unwrap_err();
        assert!(err.is_invalid_path(), "{:?} should be rejected", keypath);
    }
    assert!(t.prefs.list_keys(APP).unwrap().is_empty());
}

#[test]
fn test_reject_policy_allows_single_leading_and_trailing_slash() {
    let t = MemoryPrefs::with_policy(SegmentPolicy::Reject);
    t.prefs.set(APP, "/a/b/", 1).unwrap();
    assert_eq!(t.prefs.get(APP, "a/b").unwrap(), Value::Int(1));
}

#[test]
fn test_reject_policy_exists_still_errors() {
    let t = MemoryPrefs::with_policy(SegmentPolicy::Reject);
    assert!(t.prefs.exists(APP, "a//b").is_err());
    assert!(t.prefs.delete(APP, "a//b").is_err());
}

#[test]
fn test_policy_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(prefpath::CONFIG_FILE_NAME),
        "empty_segments = \"reject\"\n",
    )
    .unwrap();
    let prefs = Preferences::open_dir(dir.path()).unwrap();
    assert_eq!(prefs.segment_policy(), SegmentPolicy::Reject);
    assert!(prefs.set(APP, "a//b", 1).unwrap_err().is_invalid_path());
}
