//! Time constants and conversions
//!
//! Validity windows throughout the model are UTC seconds (`i64`) bounded by
//! the `LOW_DATE`/`HIGH_DATE` sentinels. All windows are half-open:
//! `valid_from <= t < valid_to`.

use chrono::{DateTime, Utc};

/// Earliest representable validity instant (1970-01-01T00:00:00Z)
pub const LOW_DATE: i64 = 0;

/// Latest representable validity instant (2100-01-01T00:00:00Z)
///
/// Counters and products created without an explicit expiry run to this
/// date, which downstream persistence treats as "never expires".
pub const HIGH_DATE: i64 = 4_102_444_800;

/// Convert a chrono timestamp to model UTC seconds
#[inline]
pub fn utc_seconds(ts: DateTime<Utc>) -> i64 {
    ts.timestamp()
}
