//! Decoding dates and times.
//!
//! This module provides:
//! - `Instant`: An absolute point in time that keeps its display offset
//! - `decode_instant` / `decode_timestamp_millis`: Multi-format absolute time decoders
//! - `decode_calendar_date`: A civil-date decoder anchored to the local timezone
//! - `ImplausibleInstant`: The defect raised for instants outside the plausibility window
//!
//! Absolute decoders accept epoch milliseconds, ISO 8601 strings with an
//! offset (kept for display), and ISO 8601 strings without one (read as
//! UTC). Every result then passes the plausibility window unless the
//! configuration says production.

mod decode;
mod format;
mod instant;
mod sanity;

pub use decode::{
    decode_calendar_date, decode_instant, decode_instant_with, decode_timestamp_millis,
    decode_timestamp_millis_with, CalendarDateDecoder, InstantDecoder,
};
pub use instant::Instant;
pub use sanity::{ImplausibleInstant, EARLIEST_PLAUSIBLE_YEAR, PLAUSIBLE_YEARS_AHEAD};
