//! In-process backing store.
//!
//! Nothing here outlives the process, so on its own it models a browser
//! tab with storage disabled. Hand the same `MemoryStore` to a second
//! session to model a page reload.

use std::collections::HashMap;

use crate::{KeyValueStore, StorageError};

/// A `HashMap`-backed [`KeyValueStore`].
///
/// Optionally enforces a quota on the total size of keys plus values,
/// counted in bytes. A write that would exceed it fails with
/// [`StorageError::QuotaExceeded`] and leaves the store untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty store with no size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that holds at most `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(limit),
        }
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            // The old value under this key is replaced, so it doesn't count.
            let replaced = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                tracing::warn!(key, needed, limit, "storage quota exceeded");
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    limit,
                });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
