//! Codec trait and the JSON implementation.
//!
//! The backing store only understands strings, so every structured value
//! goes through a [`Codec`] on its way in and out. The session layer never
//! calls `serde_json` directly; it asks its codec.

use serde::{Serialize, de::DeserializeOwned};

use crate::ModelError;

/// Converts values to text and back.
///
/// `decode` takes `DeserializeOwned` so the result never borrows from the
/// stored string, which is dropped right after hydration.
pub trait Codec {
    /// Serializes a value into text.
    ///
    /// # Errors
    /// Returns [`ModelError::Encode`] if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ModelError>;

    /// Deserializes text back into a value.
    ///
    /// # Errors
    /// Returns [`ModelError::Decode`] if the text is malformed or doesn't
    /// match the expected shape.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ModelError>;
}

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON is what the browser client has always written under the user key,
/// so stores written by either side stay readable by the other.
///
/// ```rust
/// use oa_model::{Codec, Department, JsonCodec, User};
///
/// let codec = JsonCodec;
/// let user = User::new(5).with_department(Department::new("董事会").with_leader(9));
///
/// let text = codec.encode(&user).unwrap();
/// let decoded: User = codec.decode(&text).unwrap();
/// assert_eq!(user, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ModelError> {
        serde_json::to_string(value).map_err(ModelError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ModelError> {
        serde_json::from_str(text).map_err(ModelError::Decode)
    }
}
