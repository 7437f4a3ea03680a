use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat, Utc};

/// An absolute point in time that remembers the offset it was written in.
///
/// Two instants are equal when they denote the same moment, whatever their
/// display offsets.
///
/// # Examples
///
/// ```
/// use blob_decode::Instant;
///
/// let epoch = Instant::from_utc_millis(0).unwrap();
///
/// assert!(epoch.is_epoch());
/// assert_eq!(epoch.to_string(), "1970-01-01T00:00:00Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<FixedOffset>);

impl Instant {
    /// Builds a UTC instant from Unix epoch milliseconds.
    ///
    /// Returns `None` when the value is outside the range chrono can represent.
    pub fn from_utc_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(|utc| Self(utc.fixed_offset()))
    }

    /// Borrows the underlying date-time, in its display offset.
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Returns the display offset.
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// Converts to UTC, dropping the display offset.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Calendar year in the display offset.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns `true` for exactly 1970-01-01T00:00:00Z.
    pub fn is_epoch(&self) -> bool {
        self.0.timestamp() == 0 && self.0.timestamp_subsec_nanos() == 0
    }
}

impl From<DateTime<FixedOffset>> for Instant {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }
}

impl From<Instant> for DateTime<FixedOffset> {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}
