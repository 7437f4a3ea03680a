use std::fmt;

use serde_json::Value;

use crate::verdict::Rejection;

/// The error channel of the decoder convention.
///
/// A decoder "raises" by returning `Err(Fault)`. The fault is either a tagged
/// [`DecodeError`] (the input was bad) or anything else, which is a defect in
/// the program and must never be treated as bad input.
pub type Fault = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A tagged validation failure raised by a decoder.
///
/// The tag is the type itself: a [`Fault`] is a validation failure exactly
/// when it downcasts to `DecodeError`. See [`is_decode_error`].
///
/// # Examples
///
/// ```
/// use blob_decode::DecodeError;
/// use serde_json::json;
///
/// let error = DecodeError::new("Not a valid date", json!(true))
///     .with_detail("expected number or string");
///
/// assert_eq!(error.message(), "Not a valid date");
/// assert_eq!(error.blob(), &json!(true));
/// assert_eq!(error.to_string(), "Not a valid date: expected number or string");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    message: String,
    detail: Option<String>,
    blob: Value,
    rejection: Option<Rejection>,
}

impl DecodeError {
    /// Creates a decode error for the offending blob.
    pub fn new(message: impl Into<String>, blob: Value) -> Self {
        Self {
            message: message.into(),
            detail: None,
            blob,
            rejection: None,
        }
    }

    /// Raises a verifier's rejection for `blob`, keeping the whole rejection
    /// so nothing below the top-level message is lost.
    pub fn from_rejection(rejection: Rejection, blob: Value) -> Self {
        Self {
            message: rejection.message().to_string(),
            detail: rejection.detail().map(str::to_string),
            blob,
            rejection: Some(rejection),
        }
    }

    /// Attaches a longer explanation.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
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

    /// Returns the blob that was refused.
    pub fn blob(&self) -> &Value {
        &self.blob
    }

    /// Returns the rejection this error was raised from, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// Converts back into a [`Rejection`].
    ///
    /// Returns the original rejection when there is one; otherwise builds one
    /// from the message and detail. The blob is dropped.
    pub fn into_rejection(self) -> Rejection {
        if let Some(rejection) = self.rejection {
            return rejection;
        }
        match self.detail {
            Some(detail) => Rejection::new(self.message).with_detail(detail),
            None => Rejection::new(self.message),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.rejection
            .as_ref()
            .and_then(Rejection::inner)
            .map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

/// Reports whether an arbitrary error is a tagged validation failure.
///
/// Never panics, whatever the error is.
///
/// ```
/// use blob_decode::{is_decode_error, DecodeError};
/// use serde_json::json;
///
/// let tagged = DecodeError::new("Not a number", json!("x"));
/// let other = std::fmt::Error;
///
/// assert!(is_decode_error(&tagged));
/// assert!(!is_decode_error(&other));
/// ```
pub fn is_decode_error(error: &(dyn std::error::Error + 'static)) -> bool {
    error.downcast_ref::<DecodeError>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Unrelated;

    impl fmt::Display for Unrelated {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Not a valid date")
        }
    }

    impl std::error::Error for Unrelated {}

    #[test]
    fn decode_error_keeps_blob_and_detail() {
        let error = DecodeError::new("Not an array", json!({"a": 1})).with_detail("expected an array");

        assert_eq!(error.message(), "Not an array");
        assert_eq!(error.detail(), Some("expected an array"));
        assert_eq!(error.blob(), &json!({"a": 1}));
    }

    #[test]
    fn from_rejection_round_trips_the_rejection() {
        let rejection = Rejection::new("unexpected value at position 0")
            .with_cause(crate::Cause::Rejection(Box::new(Rejection::new("Not a number"))));

        let error = DecodeError::from_rejection(rejection.clone(), json!(["x", 1]));

        assert_eq!(error.message(), "unexpected value at position 0");
        assert_eq!(error.blob(), &json!(["x", 1]));
        assert_eq!(
            std::error::Error::source(&error).map(|s| s.to_string()),
            Some("Not a number".to_string())
        );
        assert_eq!(error.into_rejection(), rejection);
    }

    #[test]
    fn into_rejection_rebuilds_from_message_and_detail() {
        let error = DecodeError::new("Not a valid date", json!(false)).with_detail("expected number or string");

        let rejection = error.into_rejection();

        assert_eq!(rejection.message(), "Not a valid date");
        assert_eq!(rejection.detail(), Some("expected number or string"));
        assert!(rejection.cause().is_none());
    }

    #[test]
    fn tag_survives_boxing_into_fault() {
        let fault: Fault = Box::new(DecodeError::new("Not a number", json!(null)));

        assert!(is_decode_error(&*fault));
    }

    #[test]
    fn tag_is_not_derived_from_message_text() {
        // Same text as a real validation failure, but a different type.
        let fault: Fault = Box::new(Unrelated);

        assert!(!is_decode_error(&*fault));
    }

    #[test]
    fn tag_check_is_safe_on_foreign_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let parse = "x".parse::<i32>().unwrap_err();

        assert!(!is_decode_error(&io));
        assert!(!is_decode_error(&parse));
    }
}
