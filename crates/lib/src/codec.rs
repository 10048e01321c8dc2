//! JSON encoding and decoding.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DocumentError;

/// Decode raw bytes into a JSON value.
pub fn decode(bytes: &[u8], location: &str) -> Result<Value, DocumentError> {
  decode_as(bytes, location)
}

/// Decode raw bytes into any deserializable type.
pub fn decode_as<T: DeserializeOwned>(bytes: &[u8], location: &str) -> Result<T, DocumentError> {
  serde_json::from_slice(bytes).map_err(|source| DocumentError::JsonDecode {
    location: location.to_string(),
    source,
  })
}

/// Encode a value as UTF-8 JSON, indented when `pretty` is set.
pub fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<Vec<u8>, DocumentError> {
  let encoded = if pretty {
    serde_json::to_vec_pretty(value)
  } else {
    serde_json::to_vec(value)
  };
  encoded.map_err(DocumentError::JsonEncode)
}
