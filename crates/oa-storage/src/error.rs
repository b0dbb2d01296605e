/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The write would push the store past its size limit.
    ///
    /// Browsers enforce a per-origin quota on local storage; stores that
    /// model one report it the same way.
    #[error("quota exceeded writing {key} (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    /// The store can't be used at all right now (disabled, locked, gone).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The persisted data exists but isn't a key-value map.
    #[error("storage corrupt: {0}")]
    Corrupt(String),
}
