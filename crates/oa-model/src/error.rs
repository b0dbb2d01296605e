//! Error types for the model layer.

/// Errors that can occur while turning records into text and back.
///
/// Each layer keeps its own error enum, so a `ModelError` always means the
/// problem is in (de)serialization, never in the backing store.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Serialization failed (turning a record into text).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning text into a record).
    ///
    /// Common causes: malformed JSON left behind by an older client, a
    /// value hand-edited in the browser's dev tools, or a field with the
    /// wrong type (e.g. `department` stored as a plain string).
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
