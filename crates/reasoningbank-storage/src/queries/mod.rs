//! SQL for each table, as free functions over a borrowed connection.

pub mod aggregate_ops;
pub mod signal_ops;
pub mod weights_ops;

use chrono::{DateTime, Utc};

/// Signals are stored with microsecond timestamps so range scans stay numeric.
pub(crate) fn to_micros(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

pub(crate) fn from_micros(us: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_micros(us)
}
