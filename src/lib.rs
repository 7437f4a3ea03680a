//! Typed decoding of untrusted JSON blobs.
//!
//! This crate turns dynamically-shaped input (API payloads, config files,
//! user input) into statically-typed values, reporting structured,
//! composable failures instead of coercing or crashing:
//! - **Two conventions**: A [`Decoder<T>`] raises on bad input, a
//!   [`Verifier<T>`] returns a [`Verdict<T>`] and never does
//! - **One bridge**: [`to_decoder`] and [`to_verifier`] are the only
//!   conversions between the two, and the only place where validation
//!   failures are told apart from defects
//! - **Composition**: [`pair`] shows how composite verifiers keep the
//!   position and cause of a nested failure
//!
//! # Core Types
//!
//! - [`Verdict<T>`] / [`Rejection`]: The result model used by verifiers
//! - [`DecodeError`]: Tagged validation failure raised by decoders
//! - [`Fault`]: The decoder error channel; anything that is not a
//!   `DecodeError` in it is a defect
//! - [`Instant`]: An absolute point in time that keeps its display offset
//! - [`DecodeConfig`]: Production mode and reference year, captured at
//!   construction
//!
//! # Examples
//!
//! ```
//! use blob_decode::{decode_number, pair, to_verifier, Decoder, Verifier};
//! use serde_json::json;
//!
//! // A verifier for [lat, lon] built from the number decoder.
//! let coordinates = pair(to_verifier(decode_number()), to_verifier(decode_number()));
//!
//! assert_eq!(coordinates.verify(&json!([52.5, 13.4])), Ok((52.5, 13.4)));
//!
//! let rejection = coordinates.verify(&json!([52.5])).unwrap_err();
//! assert_eq!(rejection.message(), "must be a 2-element sequence");
//!
//! // Bad input through the decoder face is a tagged error.
//! let fault = decode_number().decode(&json!("52.5")).unwrap_err();
//! assert!(blob_decode::is_decode_error(&*fault));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bridge;
mod combinator;
mod config;
mod decoder;
mod error;
mod primitives;
pub mod temporal;
mod verdict;

#[cfg(test)]
mod test_utils;

pub use bridge::{to_decoder, to_verifier};
pub use combinator::{map, pair, pair_decoder, Map, Pair};
pub use config::{reference_year, DecodeConfig, Mode, MODE_ENV_VAR};
pub use decoder::{Decoder, Verifier};
pub use error::{is_decode_error, DecodeError, Fault};
pub use primitives::{as_array, as_object, decode_number, NumberDecoder};
pub use temporal::{
    decode_calendar_date, decode_instant, decode_instant_with, decode_timestamp_millis,
    decode_timestamp_millis_with, ImplausibleInstant, Instant,
};
pub use verdict::{dispatch, err, ok, Cause, Rejection, Verdict};
