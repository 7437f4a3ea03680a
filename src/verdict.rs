//! The result model shared by every verifier.
//!
//! A [`Verdict<T>`] is either an accepted value or a [`Rejection`] describing
//! why the blob was refused. Rejections nest: a composite verifier wraps the
//! rejection of the component that failed as its [`Cause`], so the full path
//! down to the offending value survives aggregation.

use std::fmt;

use serde_json::Value;

/// Outcome of verifying a blob.
pub type Verdict<T> = Result<T, Rejection>;

/// What a [`Rejection`] points at as its underlying reason.
#[derive(Debug, Clone, PartialEq)]
pub enum Cause {
    /// A nested rejection produced by a component verifier.
    Rejection(Box<Rejection>),
    /// The raw blob that was refused.
    Blob(Value),
}

/// A validation failure in the verifier convention.
///
/// Carries a short `message`, an optional longer `detail`, and an optional
/// [`Cause`]. Rejections are plain values: they are never raised, and they
/// never represent a defect in the program itself.
///
/// # Examples
///
/// ```
/// use blob_decode::{Cause, Rejection};
/// use serde_json::json;
///
/// let rejection = Rejection::new("must be a 2-element sequence")
///     .with_detail("expected 2 elements, got 3")
///     .with_cause(Cause::Blob(json!([1, 2, 3])));
///
/// assert_eq!(rejection.message(), "must be a 2-element sequence");
/// assert_eq!(rejection.detail(), Some("expected 2 elements, got 3"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    message: String,
    detail: Option<String>,
    cause: Option<Cause>,
}

impl Rejection {
    /// Creates a rejection with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
            cause: None,
        }
    }

    /// Attaches a longer explanation.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attaches the underlying cause.
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Returns the short message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the longer explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the underlying cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Returns the nested rejection when the cause is one.
    pub fn inner(&self) -> Option<&Rejection> {
        match &self.cause {
            Some(Cause::Rejection(inner)) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner().map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

impl From<&str> for Rejection {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Rejection {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Builds an accepted verdict.
pub fn ok<T>(value: T) -> Verdict<T> {
    Ok(value)
}

/// Builds a rejected verdict.
///
/// Accepts a bare message or a fully built [`Rejection`] carrying detail and
/// cause.
///
/// ```
/// use blob_decode::{err, Rejection, Verdict};
///
/// let short: Verdict<u8> = err("must be a sequence");
/// let long: Verdict<u8> = err(Rejection::new("Not a valid date").with_detail("expected a string"));
/// assert!(short.is_err() && long.is_err());
/// ```
pub fn err<T>(rejection: impl Into<Rejection>) -> Verdict<T> {
    Err(rejection.into())
}

/// Applies exactly one of the two continuations and returns its value.
///
/// `on_err` receives the rejection, `on_ok` the accepted value. Nothing else
/// happens.
pub fn dispatch<T, R>(
    verdict: Verdict<T>,
    on_err: impl FnOnce(Rejection) -> R,
    on_ok: impl FnOnce(T) -> R,
) -> R {
    match verdict {
        Ok(value) => on_ok(value),
        Err(rejection) => on_err(rejection),
    }
}
