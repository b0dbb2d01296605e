//! Unified error type for the OA session crates.

use oa_model::ModelError;
use oa_session::SessionError;
use oa_storage::StorageError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `oa-auth` facade, you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attributes let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A backing-store error (i/o, quota, corrupt file).
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A model error (encode, decode).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A session-level error.
    #[error(transparent)]
    Session(#[from] SessionError),
}
