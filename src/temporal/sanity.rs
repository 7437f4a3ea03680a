//! Plausibility window for decoded instants.
//!
//! An instant far in the past or future almost always means a unit mistake
//! upstream (Unix seconds passed where milliseconds were expected, or the
//! reverse). Outside production such an instant is a defect in the caller,
//! not bad input, so it is reported as [`ImplausibleInstant`] rather than as
//! a [`DecodeError`](crate::DecodeError).

use std::fmt;
use std::ops::RangeInclusive;

use crate::config::DecodeConfig;

use super::Instant;

/// First calendar year accepted outside production.
pub const EARLIEST_PLAUSIBLE_YEAR: i32 = 1971;

/// How many years past the reference year are accepted outside production.
pub const PLAUSIBLE_YEARS_AHEAD: i32 = 50;

/// Defect raised for an instant outside the plausibility window.
///
/// Not a [`DecodeError`](crate::DecodeError), so
/// [`to_verifier`](crate::to_verifier) lets it escape instead of turning it
/// into a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplausibleInstant {
    instant: Instant,
    reference_year: i32,
}

impl ImplausibleInstant {
    /// Returns the instant that fell outside the window.
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// Returns the reference year the window was built from.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Returns the accepted years.
    pub fn plausible_years(&self) -> RangeInclusive<i32> {
        plausible_years(self.reference_year)
    }
}

impl fmt::Display for ImplausibleInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let years = self.plausible_years();
        write!(
            f,
            "instant {} is likely too far off from today to be correct (expected a year in {}..={}); \
             did you perhaps forget to multiply a Unix timestamp by 1000 to get milliseconds?",
            self.instant,
            years.start(),
            years.end()
        )
    }
}

impl std::error::Error for ImplausibleInstant {}

fn plausible_years(reference_year: i32) -> RangeInclusive<i32> {
    EARLIEST_PLAUSIBLE_YEAR..=reference_year.saturating_add(PLAUSIBLE_YEARS_AHEAD)
}

/// Passes `instant` through unless it is implausible under `config`.
///
/// Production skips the check entirely. The epoch, used as a "not set"
/// marker, is always accepted.
pub(crate) fn check(instant: Instant, config: &DecodeConfig) -> Result<Instant, ImplausibleInstant> {
    if config.skips_sanity_checks() || instant.is_epoch() {
        return Ok(instant);
    }

    if plausible_years(config.reference_year()).contains(&instant.year()) {
        return Ok(instant);
    }

    tracing::warn!(
        target: "blob_decode::temporal",
        %instant,
        reference_year = config.reference_year(),
        "implausible instant"
    );
    Err(ImplausibleInstant {
        instant,
        reference_year: config.reference_year(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    fn at_year_start(year: i32) -> Instant {
        use chrono::{TimeZone, Utc};
        Instant::from(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap().fixed_offset())
    }

    #[test]
    fn window_edges_are_inclusive() {
        let config = DecodeConfig::development(2026);

        assert!(check(at_year_start(1971), &config).is_ok());
        assert!(check(at_year_start(2076), &config).is_ok());
        assert!(check(Instant::from_utc_millis(1).unwrap(), &config).is_err());
        assert!(check(at_year_start(2077), &config).is_err());
    }

    #[test]
    fn epoch_is_always_accepted() {
        let epoch = Instant::from_utc_millis(0).unwrap();

        assert_eq!(check(epoch, &DecodeConfig::development(2026)), Ok(epoch));
    }

    #[test]
    fn production_skips_the_check() {
        let config = DecodeConfig::new(Mode::Production, 2026);

        assert!(check(at_year_start(1800), &config).is_ok());
        assert!(check(at_year_start(3000), &config).is_ok());
    }

    #[test]
    fn defect_explains_the_likely_mistake() {
        let defect = check(at_year_start(1800), &DecodeConfig::development(2026)).unwrap_err();

        assert_eq!(defect.reference_year(), 2026);
        assert_eq!(defect.plausible_years(), 1971..=2076);
        let message = defect.to_string();
        assert!(message.contains("1800-01-01T00:00:00Z"));
        assert!(message.contains("multiply a Unix timestamp by 1000"));
    }
}
