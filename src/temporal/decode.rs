use chrono::{FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde_json::Value;

use crate::{
    combinator::map,
    config::DecodeConfig,
    decoder::Decoder,
    error::{DecodeError, Fault},
    primitives::{decode_number, NumberDecoder},
};

use super::{
    format::{scan, DateFields, DateFormat},
    sanity, Instant,
};

const TARGET: &str = "blob_decode::temporal";
const NOT_A_DATE: &str = "Not a valid date";

/// Decoder for absolute instants. Built by [`decode_instant`].
#[derive(Debug, Clone, Copy)]
pub struct InstantDecoder {
    config: DecodeConfig,
    numbers: NumberDecoder,
}

/// Decoder for civil dates in the local timezone. Built by
/// [`decode_calendar_date`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarDateDecoder {
    _private: (),
}

/// Builds an instant decoder using [`DecodeConfig::ambient`].
///
/// Accepted blobs, checked in this order:
///
/// - a number: Unix epoch milliseconds, read as UTC
/// - `YYYY-MM-DD[ T]hh:mm:ss(.f)?` followed by `Z` or `±hh:mm`: the offset
///   is kept for display
/// - `YYYY-MM-DD`, optionally followed by a time without offset: read as UTC
///
/// Anything else is rejected with "Not a valid date".
///
/// # Examples
///
/// ```
/// use blob_decode::{decode_instant, Decoder};
/// use serde_json::json;
///
/// let instant = decode_instant().decode(&json!("2024-01-15T10:30:00+02:00")).unwrap();
///
/// assert_eq!(instant.offset().local_minus_utc(), 2 * 3600);
/// assert_eq!(instant.timestamp_millis(), 1_705_307_400_000);
/// ```
pub fn decode_instant() -> InstantDecoder {
    decode_instant_with(DecodeConfig::ambient())
}

/// Builds an instant decoder with an explicit configuration.
pub fn decode_instant_with(config: DecodeConfig) -> InstantDecoder {
    InstantDecoder {
        config,
        numbers: decode_number(),
    }
}

/// Same inputs and checks as [`decode_instant`], yielding epoch milliseconds.
///
/// ```
/// use blob_decode::{decode_timestamp_millis, Decoder};
/// use serde_json::json;
///
/// let millis = decode_timestamp_millis();
///
/// assert_eq!(millis.decode(&json!("1970-01-01")).unwrap(), 0);
/// assert_eq!(millis.decode(&json!(1_705_314_600_000_i64)).unwrap(), 1_705_314_600_000);
/// ```
pub fn decode_timestamp_millis() -> impl Decoder<i64> {
    decode_timestamp_millis_with(DecodeConfig::ambient())
}

/// [`decode_timestamp_millis`] with an explicit configuration.
pub fn decode_timestamp_millis_with(config: DecodeConfig) -> impl Decoder<i64> {
    map(decode_instant_with(config), |instant: Instant| {
        instant.timestamp_millis()
    })
}

/// Builds a decoder for `YYYY-MM-DD` strings, yielding the start of that
/// date in the local timezone of the running process.
///
/// This is a civil date ("May 2nd"), not an absolute instant: the same input
/// yields different instants on machines in different timezones. Use
/// [`decode_instant`] for absolute times.
///
/// ```
/// use blob_decode::{decode_calendar_date, Decoder};
/// use serde_json::json;
///
/// let date = decode_calendar_date().decode(&json!("2024-03-01")).unwrap();
/// assert_eq!(date.as_datetime().date_naive().to_string(), "2024-03-01");
///
/// assert!(decode_calendar_date().decode(&json!("2024-03-01T10:00:00")).is_err());
/// ```
pub fn decode_calendar_date() -> CalendarDateDecoder {
    CalendarDateDecoder { _private: () }
}

impl InstantDecoder {
    /// Returns the configuration captured at construction.
    pub fn config(&self) -> DecodeConfig {
        self.config
    }

    fn decode_str(&self, s: &str, blob: &Value) -> Result<Instant, DecodeError> {
        let Some(fields) = scan(s) else {
            return Err(not_a_date(blob).with_detail(format!(
                "unrecognised date string format: {:?}; expected ISO 8601",
                s
            )));
        };
        let format = fields.format();
        tracing::trace!(target: TARGET, ?format, "classified date string");

        let datetime = match format {
            DateFormat::OffsetDateTime => offset_datetime(&fields),
            DateFormat::LocalDateTime | DateFormat::Date => {
                naive_datetime(&fields).map(|naive| naive.and_utc().fixed_offset())
            }
        };
        datetime.map(Instant::from).ok_or_else(|| {
            not_a_date(blob).with_detail(format!("{:?} is not a real calendar date or time", s))
        })
    }
}

impl Decoder<Instant> for InstantDecoder {
    fn decode(&self, blob: &Value) -> Result<Instant, Fault> {
        let instant = match blob {
            Value::Number(_) => {
                let millis = self.numbers.decode(blob)?;
                from_epoch_millis(millis, blob)?
            }
            Value::String(s) => self.decode_str(s, blob)?,
            _ => return Err(not_a_date(blob).with_detail("expected number or string").into()),
        };

        sanity::check(instant, &self.config).map_err(Fault::from)
    }
}

impl Decoder<Instant> for CalendarDateDecoder {
    fn decode(&self, blob: &Value) -> Result<Instant, Fault> {
        let Some(s) = blob.as_str() else {
            return Err(not_a_date(blob).with_detail("expected a string").into());
        };

        let fields = scan(s).filter(|fields| fields.format() == DateFormat::Date);
        let Some(fields) = fields else {
            return Err(not_a_date(blob)
                .with_detail(format!(
                    "unrecognised date string format: {:?}; expected YYYY-MM-DD",
                    s
                ))
                .into());
        };

        NaiveDate::from_ymd_opt(fields.year, fields.month, fields.day)
            .and_then(local_start_of_day)
            .map(Instant::from)
            .ok_or_else(|| {
                not_a_date(blob)
                    .with_detail(format!("{:?} is not a real calendar date", s))
                    .into()
            })
    }
}

fn not_a_date(blob: &Value) -> DecodeError {
    DecodeError::new(NOT_A_DATE, blob.clone())
}

fn from_epoch_millis(millis: f64, blob: &Value) -> Result<Instant, DecodeError> {
    let truncated = millis.trunc();
    let instant = if truncated.is_finite() {
        Instant::from_utc_millis(truncated as i64)
    } else {
        None
    };
    instant.ok_or_else(|| {
        not_a_date(blob).with_detail(format!("timestamp {} is outside the representable range", millis))
    })
}

fn naive_datetime(fields: &DateFields) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(fields.year, fields.month, fields.day)?;
    let time = match fields.clock {
        Some(clock) => NaiveTime::from_hms_nano_opt(clock.hour, clock.minute, clock.second, clock.nanos)?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

fn offset_datetime(fields: &DateFields) -> Option<chrono::DateTime<FixedOffset>> {
    let naive = naive_datetime(fields)?;
    let (sign, hours, minutes) = fields.offset?;
    if minutes >= 60 {
        return None;
    }
    let seconds = sign * i32::try_from(hours * 3600 + minutes * 60).ok()?;
    let offset = FixedOffset::east_opt(seconds)?;
    offset.from_local_datetime(&naive).single()
}

/// First existing local time on `date`, normally midnight. Where a DST
/// transition skips midnight, the first whole hour after the gap is used.
fn local_start_of_day(date: NaiveDate) -> Option<chrono::DateTime<FixedOffset>> {
    (0..4).find_map(|hour| {
        let naive = date.and_hms_opt(hour, 0, 0)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.fixed_offset())
    })
}
