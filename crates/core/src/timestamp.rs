//! Microsecond-precision timestamp type
//!
//! Timestamps are stored as signed microseconds since the Unix epoch
//! (1970-01-01 00:00:00 UTC). Negative values address instants before 1970,
//! which preference stores can hold (their own epoch is 2001).
//!
//! ## Usage
//!
//! ```
//! use prefpath_core::Timestamp;
//!
//! let now = Timestamp::now();
//! let from_secs = Timestamp::from_secs(1000);
//! let from_micros = Timestamp::from_micros(1_000_000_000);
//! assert_eq!(from_secs, from_micros);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Microsecond-precision instant
///
/// ## Invariants
///
/// - Timestamps are always in microseconds
/// - Timestamps are comparable and orderable
/// - The zero timestamp represents the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a timestamp for the current moment
    ///
    /// Returns epoch if the system clock is before the Unix epoch.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_micros() as i64)
    }

    /// Create a timestamp from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Timestamp(micros)
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    /// Create a timestamp from fractional seconds since epoch
    ///
    /// Rounds to the nearest microsecond.
    pub fn from_secs_f64(secs: f64) -> Self {
        Timestamp((secs * 1_000_000.0).round() as i64)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get microseconds since Unix epoch
    #[inline]
    pub const fn as_micros(&self) -> i64 {
        self.0
    }

    /// Get whole seconds since Unix epoch (floors toward negative infinity)
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0.div_euclid(1_000_000)
    }

    /// Get fractional seconds since Unix epoch
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Absolute distance between two timestamps
    pub fn abs_diff(&self, other: Timestamp) -> Duration {
        Duration::from_micros(self.0.abs_diff(other.0))
    }

    /// Check whether two timestamps are within `tolerance` of each other
    pub fn is_within(&self, other: Timestamp, tolerance: Duration) -> bool {
        self.abs_diff(other) <= tolerance
    }

    /// Convert to a `chrono` UTC date-time
    ///
    /// Returns `None` when the instant is outside chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let secs = self.0.div_euclid(1_000_000);
        let nanos = (self.0.rem_euclid(1_000_000) * 1_000) as u32;
        Utc.timestamp_opt(secs, nanos).single()
    }

    /// Format as RFC 3339 with microsecond precision
    pub fn to_rfc3339(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            None => self.to_string(),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // "seconds.microseconds", sign carried by the whole part
        let secs = self.0.div_euclid(1_000_000);
        let micros = self.0.rem_euclid(1_000_000);
        write!(f, "{}.{:06}", secs, micros)
    }
}

// ============================================================================
// From Implementations
// ============================================================================

impl From<DateTime<Utc>> for Timestamp {
    /// Truncates to microsecond precision
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_micros())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Timestamp(after.as_micros() as i64),
            Err(before) => Timestamp(-(before.duration().as_micros() as i64)),
        }
    }
}

impl From<Timestamp> for i64 {
    /// Extract raw microseconds
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

// ============================================================================
// Tests
// ============================================================================
