//! Committed point-in-time values.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ModelError;

/// Seconds of 0001-01-01T00:00:00Z relative to the Unix epoch.
pub const MIN_SECONDS: i64 = -62_135_596_800;

/// Seconds of 9999-12-31T23:59:59Z relative to the Unix epoch.
pub const MAX_SECONDS: i64 = 253_402_300_799;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// A point in time with nanosecond precision, independent of any time zone.
///
/// Ordering is lexicographic on `(seconds, nanos)`. [`Timestamp::new`] stores
/// its components as given so that out-of-range values still compare
/// deterministically; callers that need the supported range enforced use
/// [`Timestamp::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    /// Creates a timestamp without validating its components.
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Creates a timestamp, rejecting components outside
    /// 0001-01-01T00:00:00Z..=9999-12-31T23:59:59.999999999Z.
    pub fn try_new(seconds: i64, nanos: i32) -> Result<Self, ModelError> {
        if !(MIN_SECONDS..=MAX_SECONDS).contains(&seconds) || !(0..NANOS_PER_SECOND).contains(&nanos)
        {
            debug!(seconds, nanos, "rejecting out-of-range timestamp");
            return Err(ModelError::InvalidTimestamp { seconds, nanos });
        }
        Ok(Self { seconds, nanos })
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1000),
            nanos: (millis.rem_euclid(1000) * 1_000_000) as i32,
        }
    }

    /// Seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Non-negative fraction of a second in nanoseconds.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Returns true if both components lie in the supported range.
    pub fn is_valid(&self) -> bool {
        Self::try_new(self.seconds, self.nanos).is_ok()
    }

    /// Converts a chrono UTC datetime. A leap second is folded into the
    /// following second, so `nanos` stays below one second.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let mut seconds = datetime.timestamp();
        // chrono reports a leap second as nanos in 1_000_000_000..2_000_000_000
        let mut nanos = datetime.timestamp_subsec_nanos() as i32;
        if nanos >= NANOS_PER_SECOND {
            seconds = seconds.saturating_add(1);
            nanos -= NANOS_PER_SECOND;
        }
        Self { seconds, nanos }
    }

    /// Converts to a chrono UTC datetime, or `None` if chrono cannot represent it.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::<Utc>::from_timestamp(self.seconds, nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "Timestamp(seconds={}, nanos={})", self.seconds, self.nanos),
        }
    }
}
