//! Typed accessors

use crate::common::*;
use chrono::{TimeZone, Utc};

fn seed(t: &MemoryPrefs) {
    t.prefs
        .set(
            APP,
            "cfg",
            json!({
                "name": "Ada",
                "count": 3,
                "ratio": 0.25,
                "on": true,
                "list": [1, "two"],
                "map": {"x": 1}
            }),
        )
        .unwrap();
    t.prefs
        .set(APP, "cfg/when", Timestamp::from_micros(1_600_000_000_000_001))
        .unwrap();
    t.prefs.set(APP, "cfg/blob", vec![0u8, 200, 255]).unwrap();
}

#[test]
fn test_each_accessor() {
    let t = MemoryPrefs::new();
    seed(&t);
    let p = &t.prefs;

    assert_eq!(p.get_str(APP, "cfg/name").unwrap(), "Ada");
    assert_eq!(p.get_int(APP, "cfg/count").unwrap(), 3);
    assert_eq!(p.get_float(APP, "cfg/ratio").unwrap(), 0.25);
    assert!(p.get_bool(APP, "cfg/on").unwrap());
    assert!(p
        .get_timestamp(APP, "cfg/when")
        .unwrap()
        .is_within(Timestamp::from_micros(1_600_000_000_000_001), TIMESTAMP_TOLERANCE));
    assert_eq!(p.get_bytes(APP, "cfg/blob").unwrap(), vec![0, 200, 255]);
    assert_eq!(
        p.get_array(APP, "cfg/list").unwrap(),
        vec![Value::Int(1), Value::from("two")]
    );
    assert_eq!(p.get_object(APP, "cfg/map").unwrap().get("x"), Some(&Value::Int(1)));
}

#[test]
fn test_int_is_not_float() {
    let t = MemoryPrefs::new();
    seed(&t);
    let err = t.prefs.get_float(APP, "cfg/count").unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(
        err.to_string(),
        format!("type mismatch: cfg:count [{}] - expected float64, got int64", APP)
    );
}

#[test]
fn test_float_is_not_int() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert!(t.prefs.get_int(APP, "cfg/ratio").unwrap_err().is_type_mismatch());
}

#[test]
fn test_string_is_not_bytes() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert!(t.prefs.get_bytes(APP, "cfg/name").unwrap_err().is_type_mismatch());
}

#[test]
fn test_missing_is_not_found_not_mismatch() {
    let t = MemoryPrefs::new();
    seed(&t);
    assert!(t.prefs.get_str(APP, "cfg/nope").unwrap_err().is_not_found());
}

#[test]
fn test_generic_and_query_accessors() {
    let t = MemoryPrefs::new();
    seed(&t);
    let dt: chrono::DateTime<Utc> = t.prefs.get_as(APP, "cfg/when").unwrap();
    assert_eq!(dt.timestamp(), 1_600_000_000);

    let name: String = t.prefs.get_q_as(APP, "cfg", "$.name").unwrap();
    assert_eq!(name, "Ada");
    let second: String = t.prefs.get_q_as(APP, "cfg", "$.list[1]").unwrap();
    assert_eq!(second, "two");
    assert!(t
        .prefs
        .get_q_as::<i64>(APP, "cfg", "$.list[1]")
        .unwrap_err()
        .is_type_mismatch());
}

#[test]
fn test_datetime_round_trip() {
    let t = MemoryPrefs::new();
    let when = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
    t.prefs.set(APP, "when", when).unwrap();
    let back: chrono::DateTime<Utc> = t.prefs.get_as(APP, "when").unwrap();
    assert_eq!(back, when);
}
