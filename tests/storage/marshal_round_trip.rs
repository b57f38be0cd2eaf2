//! Value <-> native conversion through a real backend

use crate::common::*;
use prefpath_storage::marshal::{date_to_timestamp, reference_epoch_offset_secs, timestamp_to_date};
use prefpath_storage::{NativeNumber, NativeValue, NativeStore, PreferenceBackend};
use chrono::TimeZone;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_reference_epoch_is_2001() {
    let expected = chrono::Utc
        .with_ymd_and_hms(2001, 1, 1, 0, 0, 0)
        .unwrap()
        .timestamp();
    assert_eq!(reference_epoch_offset_secs(), expected);
}

#[test]
fn test_timestamp_stored_as_native_date() {
    let backend = Arc::new(MemoryBackend::new());
    let store = NativeStore::new(backend.clone());
    let ts = Timestamp::from_secs(978_307_200 + 60);
    store.set(APP, "t", &Value::Timestamp(ts)).unwrap();

    let h = backend.acquire(APP).unwrap();
    assert_eq!(backend.copy_value(h, "t").unwrap(), Some(NativeValue::Date(60.0)));
    backend.release(h);
}

#[test]
fn test_integers_stored_at_narrowest_width() {
    let backend = Arc::new(MemoryBackend::new());
    let store = NativeStore::new(backend.clone());
    store.set(APP, "small", &Value::Int(-5)).unwrap();
    store.set(APP, "wide", &Value::Int(1 << 40)).unwrap();

    let h = backend.acquire(APP).unwrap();
    assert_eq!(
        backend.copy_value(h, "small").unwrap(),
        Some(NativeValue::Number(NativeNumber::SInt8(-5)))
    );
    assert_eq!(
        backend.copy_value(h, "wide").unwrap(),
        Some(NativeValue::Number(NativeNumber::SInt64(1 << 40)))
    );
    backend.release(h);
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1e12f64..1e12f64).prop_map(Value::Float),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
        (-2_000_000_000_000_000i64..2_000_000_000_000_000i64)
            .prop_map(|us| Value::Timestamp(Timestamp::from_micros(us))),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..4).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn prop_whole_root_round_trip(value in arb_value()) {
        let backend = Arc::new(MemoryBackend::new());
        let store = NativeStore::new(backend);
        store.set(APP, "k", &value).unwrap();
        let back = store.get(APP, "k").unwrap();
        prop_assert!(values_equal_approx(&back, &value), "{} != {}", back, value);
    }

    #[test]
    fn prop_date_conversion_within_a_microsecond(
        us in -2_000_000_000_000_000i64..2_000_000_000_000_000i64
    ) {
        let ts = Timestamp::from_micros(us);
        let back = date_to_timestamp(timestamp_to_date(ts));
        prop_assert!(back.is_within(ts, TIMESTAMP_TOLERANCE));
    }
}
