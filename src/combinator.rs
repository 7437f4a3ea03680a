//! Building larger validators out of smaller ones.
//!
//! [`pair`] is the reference shape for any composite verifier:
//!
//! 1. check the structural shape of the blob first,
//! 2. run every component verifier independently,
//! 3. merge the outcomes, naming the position that failed and keeping its
//!    rejection as the [`Cause`].
//!
//! Combinators are written once against the verifier convention. The
//! decoder-facing variants are derived through the bridge, never re-implemented.

use std::marker::PhantomData;

use serde_json::Value;

use crate::{
    bridge::{to_decoder, to_verifier},
    decoder::{Decoder, Verifier},
    error::Fault,
    verdict::{dispatch, err, ok, Cause, Rejection, Verdict},
};

/// Verifier for 2-element sequences. Built by [`pair`].
#[derive(Debug, Clone, Copy)]
pub struct Pair<A, B> {
    first: A,
    second: B,
}

/// Builds a verifier for `[a, b]` sequences from verifiers for each position.
///
/// Both positions are always verified. When both fail, the rejection for
/// position 0 is the one reported.
///
/// # Examples
///
/// ```
/// use blob_decode::{decode_number, pair, to_verifier, Verifier};
/// use serde_json::json;
///
/// let point = pair(to_verifier(decode_number()), to_verifier(decode_number()));
///
/// assert_eq!(point.verify(&json!([1, 2])), Ok((1.0, 2.0)));
///
/// let rejection = point.verify(&json!([1, "two"])).unwrap_err();
/// assert_eq!(rejection.message(), "unexpected value at position 1");
/// assert_eq!(rejection.inner().unwrap().message(), "Not a number");
/// ```
pub fn pair<A, B>(first: A, second: B) -> Pair<A, B> {
    Pair { first, second }
}

impl<TA, TB, A, B> Verifier<(TA, TB)> for Pair<A, B>
where
    A: Verifier<TA>,
    B: Verifier<TB>,
{
    fn verify(&self, blob: &Value) -> Verdict<(TA, TB)> {
        let Some(items) = blob.as_array() else {
            return err("must be a sequence");
        };

        let [first, second] = items.as_slice() else {
            return err(Rejection::new("must be a 2-element sequence")
                .with_detail(format!(
                    "expected a 2-element sequence, but got a sequence of {} elements",
                    items.len()
                ))
                .with_cause(Cause::Blob(blob.clone())));
        };

        let a = self.first.verify(first);
        let b = self.second.verify(second);

        dispatch(
            a,
            |rejection| err(at_position(0, rejection)),
            |a| {
                dispatch(
                    b,
                    |rejection| err(at_position(1, rejection)),
                    |b| ok((a, b)),
                )
            },
        )
    }
}

fn at_position(position: usize, rejection: Rejection) -> Rejection {
    Rejection::new(format!("unexpected value at position {}", position))
        .with_cause(Cause::Rejection(Box::new(rejection)))
}

/// Decoder-facing [`pair`], derived through the bridge.
///
/// ```
/// use blob_decode::{decode_number, decode_timestamp_millis, pair_decoder, Decoder};
/// use serde_json::json;
///
/// let sample = pair_decoder(decode_timestamp_millis(), decode_number());
///
/// let (at, reading) = sample.decode(&json!(["2024-01-15T10:30:00Z", 21.5])).unwrap();
/// assert_eq!(at, 1_705_314_600_000);
/// assert_eq!(reading, 21.5);
/// ```
pub fn pair_decoder<TA, TB, A, B>(
    first: A,
    second: B,
) -> impl Decoder<(TA, TB)>
where
    A: Decoder<TA>,
    B: Decoder<TB>,
{
    to_decoder(pair(to_verifier(first), to_verifier(second)))
}

/// Decoder that projects another decoder's output. Built by [`map`].
pub struct Map<D, F, T> {
    decoder: D,
    f: F,
    _decoded: PhantomData<fn() -> T>,
}

/// Decodes with `decoder`, then transforms the value with `f`.
///
/// Failures from `decoder`, tagged or not, pass through untouched.
///
/// ```
/// use blob_decode::{decode_number, map, Decoder};
/// use serde_json::json;
///
/// let cents = map(decode_number(), |n: f64| (n * 100.0).round() as i64);
///
/// assert_eq!(cents.decode(&json!(12.34)).unwrap(), 1234);
/// ```
pub fn map<T, U, D, F>(decoder: D, f: F) -> Map<D, F, T>
where
    D: Decoder<T>,
    F: Fn(T) -> U,
{
    Map {
        decoder,
        f,
        _decoded: PhantomData,
    }
}

impl<T, U, D, F> Decoder<U> for Map<D, F, T>
where
    D: Decoder<T>,
    F: Fn(T) -> U,
{
    fn decode(&self, blob: &Value) -> Result<U, Fault> {
        self.decoder.decode(blob).map(&self.f)
    }
}
