//! `SessionStoreBuilder`: picks a backing store and wires up a session.
//!
//! The session crate is generic over its storage. Most applications just
//! want "a session in this file" or "a session in memory", so the builder
//! makes that choice at runtime and hands back a [`DynSessionStore`].

use std::path::PathBuf;

use oa_session::{SessionConfig, SessionStore};
use oa_storage::{FileStore, KeyValueStore, MemoryStore};

use crate::AuthError;

/// A session over a boxed, runtime-chosen backing store.
pub type DynSessionStore = SessionStore<Box<dyn KeyValueStore>>;

#[derive(Debug, Clone)]
enum Backend {
    Memory { quota: Option<usize> },
    File(PathBuf),
}

/// Builder for configuring and opening a session store.
///
/// # Example
///
/// ```rust,no_run
/// use oa_auth::prelude::*;
///
/// let mut session = SessionStoreBuilder::new()
///     .file("/var/lib/oa/session.json")
///     .build()?;
/// if session.is_logged_in()? {
///     println!("signed in as {:?}", session.user()?.uid);
/// }
/// # Ok::<(), oa_auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SessionStoreBuilder {
    backend: Backend,
    config: SessionConfig,
}

impl SessionStoreBuilder {
    /// Creates a builder for an unbounded in-memory session with the
    /// default configuration.
    pub fn new() -> Self {
        Self {
            backend: Backend::Memory { quota: None },
            config: SessionConfig::default(),
        }
    }

    /// Keeps the session in memory only.
    pub fn memory(mut self) -> Self {
        self.backend = Backend::Memory { quota: None };
        self
    }

    /// Keeps the session in memory, limited to `bytes` of keys plus values.
    pub fn memory_with_quota(mut self, bytes: usize) -> Self {
        self.backend = Backend::Memory { quota: Some(bytes) };
        self
    }

    /// Persists the session to a JSON file at `path`.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend = Backend::File(path.into());
        self
    }

    /// Sets the session configuration (storage keys, board department).
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Opens the backing store and returns the session over it.
    ///
    /// # Errors
    /// [`AuthError::Storage`] if a file-backed store can't be opened.
    pub fn build(self) -> Result<DynSessionStore, AuthError> {
        let storage: Box<dyn KeyValueStore> = match self.backend {
            Backend::Memory { quota: None } => Box::new(MemoryStore::new()),
            Backend::Memory { quota: Some(limit) } => {
                Box::new(MemoryStore::with_quota(limit))
            }
            Backend::File(path) => Box::new(FileStore::open(path)?),
        };

        tracing::debug!(
            user_key = %self.config.user_key,
            token_key = %self.config.token_key,
            "session store opened"
        );
        Ok(SessionStore::with_config(storage, self.config))
    }
}

impl Default for SessionStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
