//! Error types for the session layer.

/// Errors that can occur during session operations.
///
/// Storage faults pass through unchanged. A malformed persisted user is
/// not an error: the session reads as signed out.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backing store failed to read, write, or remove a key.
    #[error(transparent)]
    Storage(#[from] oa_storage::StorageError),

    /// The user record couldn't be encoded for storage.
    #[error(transparent)]
    Model(#[from] oa_model::ModelError),

    /// A permission wasn't a known flag name or a mask within `0b111`.
    #[error("unknown permission {0:?}")]
    InvalidPermission(String),

    /// A permission combination operator wasn't one of the known spellings.
    #[error("unknown permission combinator {0:?} (expected \"|\" or \"&\")")]
    InvalidCombine(String),
}
