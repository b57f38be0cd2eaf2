//! Native preference type set
//!
//! The value model a preference backend stores. It mirrors what an OS
//! preference store understands: strings, sized numbers, booleans, dates,
//! opaque data, arrays and dictionaries. There is no null; absence is
//! expressed by the key not being present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number with an explicit storage width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NativeNumber {
    /// 8-bit signed integer
    SInt8(i8),
    /// 16-bit signed integer
    SInt16(i16),
    /// 32-bit signed integer
    SInt32(i32),
    /// 64-bit signed integer
    SInt64(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
}

impl NativeNumber {
    /// Smallest signed width that holds `i` exactly
    pub fn from_i64(i: i64) -> Self {
        if let Ok(v) = i8::try_from(i) {
            NativeNumber::SInt8(v)
        } else if let Ok(v) = i16::try_from(i) {
            NativeNumber::SInt16(v)
        } else if let Ok(v) = i32::try_from(i) {
            NativeNumber::SInt32(v)
        } else {
            NativeNumber::SInt64(i)
        }
    }

    /// Check if this is an integer width
    pub fn is_integer(&self) -> bool {
        !matches!(self, NativeNumber::Float32(_) | NativeNumber::Float64(_))
    }
}

/// Value in the native preference type set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeValue {
    /// UTF-8 string
    String(String),
    /// Sized number
    Number(NativeNumber),
    /// Boolean
    Boolean(bool),
    /// Absolute time as seconds since 2001-01-01T00:00:00Z
    Date(f64),
    /// Opaque bytes
    Data(Vec<u8>),
    /// Ordered list
    Array(Vec<NativeValue>),
    /// String-keyed dictionary
    Dictionary(BTreeMap<String, NativeValue>),
}

impl NativeValue {
    /// Native type name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::String(_) => "string",
            NativeValue::Number(_) => "number",
            NativeValue::Boolean(_) => "boolean",
            NativeValue::Date(_) => "date",
            NativeValue::Data(_) => "data",
            NativeValue::Array(_) => "array",
            NativeValue::Dictionary(_) => "dictionary",
        }
    }
}
