//! Shape assertions and scalar decoders the composite decoders build on.

use serde_json::{Map, Value};

use crate::{
    decoder::Decoder,
    error::{DecodeError, Fault},
};

/// Asserts that the blob is an array and returns its elements.
///
/// # Errors
///
/// Returns a [`DecodeError`] carrying the blob when it is not an array.
pub fn as_array(blob: &Value) -> Result<&[Value], DecodeError> {
    blob.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| DecodeError::new("Not an array", blob.clone()).with_detail("expected an array"))
}

/// Asserts that the blob is an object and returns its entries.
///
/// # Errors
///
/// Returns a [`DecodeError`] carrying the blob when it is not an object.
pub fn as_object(blob: &Value) -> Result<&Map<String, Value>, DecodeError> {
    blob.as_object()
        .ok_or_else(|| DecodeError::new("Not an object", blob.clone()).with_detail("expected an object"))
}

/// Decoder for JSON numbers. Built by [`decode_number`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberDecoder {
    _private: (),
}

/// Builds a decoder that accepts any JSON number as an `f64`.
///
/// ```
/// use blob_decode::{decode_number, Decoder};
/// use serde_json::json;
///
/// let number = decode_number();
///
/// assert_eq!(number.decode(&json!(3)).unwrap(), 3.0);
/// assert!(number.decode(&json!("3")).is_err());
/// ```
pub fn decode_number() -> NumberDecoder {
    NumberDecoder { _private: () }
}

impl Decoder<f64> for NumberDecoder {
    fn decode(&self, blob: &Value) -> Result<f64, Fault> {
        match blob.as_f64() {
            Some(n) => Ok(n),
            None => Err(Fault::from(
                DecodeError::new("Not a number", blob.clone()).with_detail("expected a number"),
            )),
        }
    }
}
