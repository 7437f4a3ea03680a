//! Conversion between the decoder and verifier conventions.
//!
//! This is the only place where a [`Rejection`](crate::Rejection) becomes a
//! raised [`DecodeError`] or the other way round. It is also the place that
//! tells validation failures apart from defects.
//!
//! The handling is deliberately asymmetric:
//!
//! - [`to_decoder`] raises every rejection as a tagged [`DecodeError`].
//! - [`to_verifier`] turns tagged failures back into rejections, but lets any
//!   untagged fault escape as a panic carrying the original [`Fault`]. A
//!   defect is never reported as bad input.

use std::panic;

use serde_json::Value;

use crate::{
    decoder::{Decoder, Verifier},
    error::{DecodeError, Fault},
    verdict::{dispatch, err, ok, Verdict},
};

const TARGET: &str = "blob_decode::bridge";

/// A verifier presented as a decoder. Built by [`to_decoder`].
#[derive(Debug, Clone, Copy)]
pub struct AsDecoder<V> {
    verifier: V,
}

/// A decoder presented as a verifier. Built by [`to_verifier`].
#[derive(Debug, Clone, Copy)]
pub struct AsVerifier<D> {
    decoder: D,
}

/// Wraps a verifier so that rejections are raised as [`DecodeError`]s.
///
/// The raised error carries the rejection's message and detail plus the
/// offending blob, and keeps the full rejection for later recovery.
///
/// # Examples
///
/// ```
/// use blob_decode::{err, is_decode_error, ok, to_decoder, Decoder, Verdict};
/// use serde_json::{json, Value};
///
/// let even = to_decoder(|blob: &Value| -> Verdict<u64> {
///     match blob.as_u64() {
///         Some(n) if n % 2 == 0 => ok(n),
///         _ => err("must be even"),
///     }
/// });
///
/// assert_eq!(even.decode(&json!(4)).unwrap(), 4);
///
/// let fault = even.decode(&json!(3)).unwrap_err();
/// assert!(is_decode_error(&*fault));
/// assert_eq!(fault.to_string(), "must be even");
/// ```
pub fn to_decoder<T, V>(verifier: V) -> AsDecoder<V>
where
    V: Verifier<T>,
{
    AsDecoder { verifier }
}

/// Wraps a decoder so that tagged failures come back as rejections.
///
/// # Panics
///
/// Panics when the decoder returns a fault that is not a [`DecodeError`].
/// The panic payload is the original [`Fault`], unchanged, so callers that
/// catch the unwind can still inspect it.
///
/// # Examples
///
/// ```
/// use blob_decode::{decode_number, to_verifier, Verifier};
/// use serde_json::json;
///
/// let numbers = to_verifier(decode_number());
///
/// assert_eq!(numbers.verify(&json!(1.5)), Ok(1.5));
/// assert_eq!(numbers.verify(&json!("1.5")).unwrap_err().message(), "Not a number");
/// ```
pub fn to_verifier<T, D>(decoder: D) -> AsVerifier<D>
where
    D: Decoder<T>,
{
    AsVerifier { decoder }
}

impl<T, V> Decoder<T> for AsDecoder<V>
where
    V: Verifier<T>,
{
    fn decode(&self, blob: &Value) -> Result<T, Fault> {
        dispatch(
            self.verifier.verify(blob),
            |rejection| {
                tracing::debug!(target: TARGET, reason = %rejection, "verifier rejected blob");
                Err(Fault::from(DecodeError::from_rejection(rejection, blob.clone())))
            },
            Ok,
        )
    }
}

impl<T, D> Verifier<T> for AsVerifier<D>
where
    D: Decoder<T>,
{
    fn verify(&self, blob: &Value) -> Verdict<T> {
        match self.decoder.decode(blob) {
            Ok(value) => ok(value),
            Err(fault) => match fault.downcast::<DecodeError>() {
                Ok(tagged) => err(tagged.into_rejection()),
                Err(defect) => {
                    tracing::error!(target: TARGET, error = %defect, "defect escaped a decoder");
                    panic::panic_any(defect)
                }
            },
        }
    }
}
