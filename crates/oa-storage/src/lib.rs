//! Backing stores for the OA session store.
//!
//! Provides the [`KeyValueStore`] trait, the durable string map a session
//! persists into, plus two implementations:
//!
//! - [`MemoryStore`] — a plain in-process map, with an optional quota.
//! - [`FileStore`] — a JSON file on disk that survives restarts the way
//!   browser local storage survives page reloads.
//!
//! # Feature Flags
//!
//! - `file` (default) — the file-backed store via `serde_json`

mod error;
#[cfg(feature = "file")]
mod file;
mod memory;

pub use error::StorageError;
#[cfg(feature = "file")]
pub use file::FileStore;
pub use memory::MemoryStore;

/// A durable map from string keys to string values.
///
/// Mirrors the browser's local storage surface: values are opaque text,
/// writes replace, and removing a missing key is not an error.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `Ok(None)` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Succeeds whether or not the key existed.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Lets a caller lend a store to a session without giving it up.
impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
