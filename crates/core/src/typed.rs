//! Typed access to dynamic values
//!
//! [`FromValue`] narrows a [`Value`] to a Rust type when, and only when, the
//! value's dynamic tag matches. There is no coercion between kinds: an
//! `Int` requested as `f64` is a mismatch, not a cast.

use crate::timestamp::Timestamp;
use crate::value::{Value, ValueKind};
use crate::walk::WalkError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Types a [`Value`] can be narrowed to
pub trait FromValue: Sized {
    /// Dynamic kind this type accepts
    const KIND: ValueKind;

    /// Narrow the value, returning it unchanged on a kind mismatch
    fn from_value(value: Value) -> Result<Self, Value>;
}

/// Narrow `value` to `T`, reporting expected and actual kinds on mismatch
pub fn cast<T: FromValue>(value: Value) -> Result<T, WalkError> {
    T::from_value(value).map_err(|other| WalkError::TypeMismatch {
        expected: T::KIND,
        actual: other.kind(),
    })
}

macro_rules! impl_from_value {
    ($t:ty, $kind:ident, $variant:ident) => {
        impl FromValue for $t {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

impl_from_value!(String, String, String);
impl_from_value!(i64, Int, Int);
impl_from_value!(f64, Float, Float);
impl_from_value!(bool, Bool, Bool);
impl_from_value!(Timestamp, Timestamp, Timestamp);
impl_from_value!(Vec<u8>, Bytes, Bytes);
impl_from_value!(Vec<Value>, Array, Array);
impl_from_value!(HashMap<String, Value>, Object, Object);

impl FromValue for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Timestamp(ts) => ts.to_datetime().ok_or(Value::Timestamp(ts)),
            other => Err(other),
        }
    }
}
