//! Conversion between [`Value`] and the native type set
//!
//! Integers are stored at the narrowest signed width that holds them and
//! always read back as `Int(i64)`. Timestamps are stored as native dates,
//! seconds since 2001-01-01T00:00:00Z as `f64`, which keeps microsecond
//! precision to within one microsecond.
//!
//! Data read from the store is decoded opportunistically, in this order:
//! a nested property-list archive, then JSON, then the raw bytes.

use crate::archive;
use crate::error::{BackendError, BackendResult};
use crate::native::{NativeNumber, NativeValue};
use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use prefpath_core::{validate_depth, Timestamp, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

const REFERENCE_EPOCH_FALLBACK_SECS: i64 = 978_307_200;

static REFERENCE_EPOCH_SECS: Lazy<i64> = Lazy::new(|| {
    Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0)
        .single()
        .map(|dt| dt.timestamp())
        .unwrap_or(REFERENCE_EPOCH_FALLBACK_SECS)
});

/// Seconds between the Unix epoch and the native date epoch (2001-01-01 UTC)
pub fn reference_epoch_offset_secs() -> i64 {
    *REFERENCE_EPOCH_SECS
}

fn reference_epoch_micros() -> i64 {
    Timestamp::from_secs(reference_epoch_offset_secs()).as_micros()
}

/// Convert a Unix-epoch timestamp to a native date
pub fn timestamp_to_date(ts: Timestamp) -> f64 {
    Timestamp::from_micros(ts.as_micros().saturating_sub(reference_epoch_micros())).as_secs_f64()
}

/// Convert a native date to a Unix-epoch timestamp
pub fn date_to_timestamp(secs: f64) -> Timestamp {
    let since_reference = Timestamp::from_secs_f64(secs);
    Timestamp::from_micros(since_reference.as_micros().saturating_add(reference_epoch_micros()))
}

/// Convert a value into the native type set
///
/// Fails for `Null` (the store has no null; absence is the only "no value")
/// and for trees nested deeper than the depth limit.
pub fn to_native(value: &Value) -> BackendResult<NativeValue> {
    validate_depth(value).map_err(|e| BackendError::Unsupported(e.to_string()))?;
    convert_out(value)
}

fn convert_out(value: &Value) -> BackendResult<NativeValue> {
    Ok(match value {
        Value::Null => {
            return Err(BackendError::Unsupported(
                "null cannot be stored in a preference store".into(),
            ))
        }
        Value::Bool(b) => NativeValue::Boolean(*b),
        Value::Int(i) => NativeValue::Number(NativeNumber::from_i64(*i)),
        Value::Float(f) => NativeValue::Number(NativeNumber::Float64(*f)),
        Value::String(s) => NativeValue::String(s.clone()),
        Value::Timestamp(ts) => NativeValue::Date(timestamp_to_date(*ts)),
        Value::Bytes(b) => NativeValue::Data(b.clone()),
        Value::Array(items) => NativeValue::Array(
            items
                .iter()
                .map(convert_out)
                .collect::<BackendResult<Vec<_>>>()?,
        ),
        Value::Object(map) => NativeValue::Dictionary(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), convert_out(v)?)))
                .collect::<BackendResult<BTreeMap<_, _>>>()?,
        ),
    })
}

/// Convert a native value into a [`Value`]
pub fn from_native(value: NativeValue) -> Value {
    match value {
        NativeValue::String(s) => Value::String(s),
        NativeValue::Number(n) => match n {
            NativeNumber::SInt8(i) => Value::Int(i64::from(i)),
            NativeNumber::SInt16(i) => Value::Int(i64::from(i)),
            NativeNumber::SInt32(i) => Value::Int(i64::from(i)),
            NativeNumber::SInt64(i) => Value::Int(i),
            NativeNumber::Float32(f) => Value::Float(f64::from(f)),
            NativeNumber::Float64(f) => Value::Float(f),
        },
        NativeValue::Boolean(b) => Value::Bool(b),
        NativeValue::Date(secs) => Value::Timestamp(date_to_timestamp(secs)),
        NativeValue::Data(bytes) => decode_data(bytes),
        NativeValue::Array(items) => Value::Array(items.into_iter().map(from_native).collect()),
        NativeValue::Dictionary(dict) => Value::Object(
            dict.into_iter()
                .map(|(k, v)| (k, from_native(v)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

fn decode_data(bytes: Vec<u8>) -> Value {
    if bytes.is_empty() {
        return Value::Bytes(bytes);
    }
    if let Ok(nested) = archive::decode(&bytes) {
        trace!(target: "prefpath::adapter", len = bytes.len(), "Data decoded as archive");
        return from_native(nested);
    }
    if let Some(json) = Value::from_json_slice(&bytes) {
        trace!(target: "prefpath::adapter", len = bytes.len(), "Data decoded as JSON");
        return json;
    }
    Value::Bytes(bytes)
}
