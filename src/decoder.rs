//! The two calling conventions for turning a blob into a `T`.
//!
//! - A [`Decoder<T>`] returns `Result<T, Fault>`. Its error channel carries
//!   tagged validation failures and, unchanged, any defect raised further down.
//! - A [`Verifier<T>`] returns [`Verdict<T>`] and never reports bad input any
//!   other way.
//!
//! Both are implemented for plain closures, so a one-off validator needs no
//! named type. Converting between the two goes through [`crate::bridge`].

use serde_json::Value;

use crate::{error::Fault, verdict::Verdict};

/// Validates and converts a blob, raising on bad input.
///
/// # Invariants
///
/// Implementations MUST:
/// - Hold no mutable state between calls
/// - Report bad input as a [`DecodeError`](crate::DecodeError) inside the [`Fault`]
/// - Leave any other fault untouched so it still reads as a defect
///
/// # Examples
///
/// ```
/// use blob_decode::{Decoder, DecodeError, Fault};
/// use serde_json::{json, Value};
///
/// let decode_flag = |blob: &Value| -> Result<bool, Fault> {
///     blob.as_bool()
///         .ok_or_else(|| DecodeError::new("Not a boolean", blob.clone()).into())
/// };
///
/// assert!(decode_flag.decode(&json!(true)).unwrap());
/// assert!(decode_flag.decode(&json!("yes")).is_err());
/// ```
pub trait Decoder<T> {
    /// Decodes `blob`.
    ///
    /// # Errors
    ///
    /// Returns a [`Fault`] wrapping a [`DecodeError`](crate::DecodeError) when
    /// the blob is invalid, or any other fault when something unrelated broke.
    fn decode(&self, blob: &Value) -> Result<T, Fault>;
}

/// Validates and converts a blob, reporting bad input as a [`Verdict`].
///
/// A verifier never uses its return value for defects. Bad input yields
/// `Err(Rejection)`; nothing else does.
///
/// # Examples
///
/// ```
/// use blob_decode::{err, ok, Verdict, Verifier};
/// use serde_json::{json, Value};
///
/// let verify_name = |blob: &Value| -> Verdict<String> {
///     match blob.as_str() {
///         Some(s) if !s.is_empty() => ok(s.to_string()),
///         _ => err("must be a non-empty string"),
///     }
/// };
///
/// assert_eq!(verify_name.verify(&json!("ada")), Ok("ada".to_string()));
/// assert!(verify_name.verify(&json!(3)).is_err());
/// ```
pub trait Verifier<T> {
    /// Verifies `blob`.
    fn verify(&self, blob: &Value) -> Verdict<T>;
}

impl<T, F> Decoder<T> for F
where
    F: Fn(&Value) -> Result<T, Fault>,
{
    fn decode(&self, blob: &Value) -> Result<T, Fault> {
        self(blob)
    }
}

impl<T, F> Verifier<T> for F
where
    F: Fn(&Value) -> Verdict<T>,
{
    fn verify(&self, blob: &Value) -> Verdict<T> {
        self(blob)
    }
}
