//! Millisecond timestamps

use std::fmt::{self, Write};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A point in time as Unix epoch milliseconds.
///
/// The stored column holds the same `i64`, so converting to and from the
/// database never loses precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from Unix epoch milliseconds
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Current wall-clock time
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Unix epoch milliseconds
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Convert to a UTC date-time, `None` when out of chrono's range
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Format in the given time zone using a strftime-style pattern.
    ///
    /// Falls back to RFC 3339 when the pattern is invalid.
    pub fn format_in<Tz>(self, tz: &Tz, pattern: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let Some(datetime) = self.to_datetime() else {
            return self.0.to_string();
        };
        let local = datetime.with_timezone(tz);

        let mut formatted = String::new();
        if write!(formatted, "{}", local.format(pattern)).is_err() {
            return local.to_rfc3339();
        }
        formatted
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "{}", self.0),
        }
    }
}
