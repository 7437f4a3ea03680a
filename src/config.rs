//! Ambient configuration consulted by the temporal decoders.
//!
//! Two values matter: whether the process runs in production [`Mode`], and
//! the reference year used to build the plausibility window for decoded
//! instants. Both are captured into a [`DecodeConfig`] when a decoder is
//! constructed, so decoding itself never reads the environment and tests can
//! inject whatever they need.

use std::sync::OnceLock;

use chrono::{Datelike, Utc};

/// Environment variable selecting the [`Mode`].
pub const MODE_ENV_VAR: &str = "BLOB_DECODE_ENV";

static REFERENCE_YEAR: OnceLock<i32> = OnceLock::new();

/// Whether sanity checks on decoded values run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Sanity checks run and report implausible values as defects.
    #[default]
    Development,
    /// Sanity checks are skipped.
    Production,
}

impl Mode {
    /// Reads the mode from [`MODE_ENV_VAR`].
    ///
    /// Unset or unrecognised values select [`Mode::Development`].
    pub fn from_env() -> Self {
        std::env::var(MODE_ENV_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Interprets a raw mode value. Only `production` (any case, surrounding
    /// whitespace ignored) selects [`Mode::Production`].
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Returns the current UTC year as of the first call in this process.
///
/// Later calls return the same year even if the calendar has moved on.
pub fn reference_year() -> i32 {
    *REFERENCE_YEAR.get_or_init(|| Utc::now().year())
}

/// Configuration captured by decoders at construction time.
///
/// # Examples
///
/// ```
/// use blob_decode::{DecodeConfig, Mode};
///
/// let config = DecodeConfig::development(2024);
/// assert_eq!(config.mode(), Mode::Development);
/// assert_eq!(config.reference_year(), 2024);
/// assert!(!config.skips_sanity_checks());
///
/// assert!(DecodeConfig::production().skips_sanity_checks());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    mode: Mode,
    reference_year: i32,
}

impl DecodeConfig {
    /// Creates a configuration from explicit values.
    pub fn new(mode: Mode, reference_year: i32) -> Self {
        Self {
            mode,
            reference_year,
        }
    }

    /// Mode from the environment, reference year from [`reference_year`].
    pub fn ambient() -> Self {
        Self::new(Mode::from_env(), reference_year())
    }

    /// Production mode with the process reference year.
    pub fn production() -> Self {
        Self::new(Mode::Production, reference_year())
    }

    /// Development mode with an explicit reference year.
    pub fn development(reference_year: i32) -> Self {
        Self::new(Mode::Development, reference_year)
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the reference year.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Returns `true` when sanity checks are skipped.
    pub fn skips_sanity_checks(&self) -> bool {
        self.mode == Mode::Production
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::ambient()
    }
}
