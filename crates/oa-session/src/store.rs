//! The session store: who is signed in, and what may they do.
//!
//! `SessionStore` owns two cached values, the current [`User`] and the
//! access token, on top of a [`KeyValueStore`] that keeps them across
//! restarts. It is responsible for:
//! - Writing a new session through to storage on sign-in
//! - Wiping it on sign-out
//! - Rehydrating each value lazily the first time it's read
//! - Deriving the permission mask on demand
//!
//! # Concurrency note
//!
//! Every read may fill the cache, so every accessor takes `&mut self`.
//! The store is owned by one caller at a time; wrap it in a lock at a
//! higher level if it ever has to be shared.

use oa_model::{Codec, JsonCodec, User};
use oa_storage::KeyValueStore;

use crate::{Combine, Permissions, SessionConfig, SessionError};

/// Cached, persisted session state.
///
/// ## Lifecycle
///
/// ```text
///            set_session()                 clear_session()
/// [signed out] ──────────→ [signed in] ──────────────────→ [signed out]
///      ↑                        │
///      └── restart: new store over the same storage rehydrates ──┘
/// ```
///
/// "Signed in" isn't stored anywhere. It is recomputed from the two cached
/// values every time it's asked for: a non-empty user AND a non-empty
/// token. A store holding only one of the two reads as signed out.
pub struct SessionStore<S, C = JsonCodec> {
    /// Durable home of the session.
    storage: S,

    /// Turns the user record into text for `storage` and back.
    codec: C,

    /// Storage keys and the board department name.
    config: SessionConfig,

    /// Cached user. Empty means "not loaded yet, or nobody signed in".
    user: User,

    /// Cached token. Empty means "not loaded yet, or nobody signed in".
    token: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Creates a store over `storage` with the default keys and JSON codec.
    ///
    /// Nothing is read yet; the first accessor call hydrates the cache.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, SessionConfig::default())
    }

    /// Creates a store over `storage` with custom keys / board name.
    pub fn with_config(storage: S, config: SessionConfig) -> Self {
        Self::with_codec(storage, JsonCodec, config)
    }
}

impl<S: KeyValueStore, C: Codec> SessionStore<S, C> {
    /// Creates a store with an explicit codec.
    pub fn with_codec(storage: S, codec: C, config: SessionConfig) -> Self {
        Self {
            storage,
            codec,
            config,
            user: User::default(),
            token: String::new(),
        }
    }

    /// Starts a session: caches `user` and `token`, then writes both to
    /// storage (user first).
    ///
    /// The token isn't checked. Passing an empty one stores a session that
    /// reads as signed out.
    ///
    /// # Errors
    /// - [`SessionError::Model`] if the user can't be encoded; nothing has
    ///   changed in that case.
    /// - [`SessionError::Storage`] if a write fails. The cache already
    ///   holds the new session; storage may hold only part of it.
    pub fn set_session(
        &mut self,
        user: User,
        token: impl Into<String>,
    ) -> Result<(), SessionError> {
        let encoded = self.codec.encode(&user)?;
        let token = token.into();

        tracing::info!(
            uid = ?user.uid,
            token_len = token.len(),
            "session set"
        );

        self.user = user;
        self.token = token;

        self.storage.set(&self.config.user_key, &encoded)?;
        self.storage.set(&self.config.token_key, &self.token)?;
        Ok(())
    }

    /// Ends the session: empties the cache and removes both keys.
    ///
    /// Safe to call when nobody is signed in.
    ///
    /// # Errors
    /// [`SessionError::Storage`] if a key can't be removed. The cache is
    /// already empty by then.
    pub fn clear_session(&mut self) -> Result<(), SessionError> {
        self.user = User::default();
        self.token.clear();

        self.storage.remove(&self.config.user_key)?;
        self.storage.remove(&self.config.token_key)?;

        tracing::info!("session cleared");
        Ok(())
    }

    /// Returns the current user, loading it from storage if the cache is
    /// empty.
    ///
    /// A missing entry gives the empty user. So does an entry that doesn't
    /// decode: it's logged and skipped, not cached, and not removed.
    ///
    /// # Errors
    /// [`SessionError::Storage`] if storage can't be read.
    pub fn user(&mut self) -> Result<&User, SessionError> {
        if self.user.is_empty() {
            self.hydrate_user()?;
        }
        Ok(&self.user)
    }

    /// Returns the current token, loading it from storage if the cache is
    /// empty. `""` when there is none.
    ///
    /// # Errors
    /// [`SessionError::Storage`] if storage can't be read.
    pub fn token(&mut self) -> Result<&str, SessionError> {
        if self.token.is_empty() {
            if let Some(token) = self.storage.get(&self.config.token_key)? {
                if !token.is_empty() {
                    tracing::debug!(token_len = token.len(), "token hydrated from storage");
                    self.token = token;
                }
            }
        }
        Ok(&self.token)
    }

    /// Returns both halves of the session after hydrating them.
    pub fn session(&mut self) -> Result<(&User, &str), SessionError> {
        self.user()?;
        self.token()?;
        Ok((&self.user, self.token.as_str()))
    }

    /// Returns `true` if there is a non-empty user AND a non-empty token.
    ///
    /// The token isn't read when the user is already empty.
    pub fn is_logged_in(&mut self) -> Result<bool, SessionError> {
        if self.user()?.is_empty() {
            return Ok(false);
        }
        Ok(!self.token()?.is_empty())
    }

    /// Derives the permission mask for the current session.
    ///
    /// Signed out is always [`Permissions::STAFF`]. Signed in, see
    /// [`Permissions::derive`]. The result is never cached.
    pub fn own_permissions(&mut self) -> Result<Permissions, SessionError> {
        if !self.is_logged_in()? {
            return Ok(Permissions::STAFF);
        }

        let permissions =
            Permissions::derive(&self.user, &self.config.board_department);
        tracing::debug!(uid = ?self.user.uid, %permissions, "permissions derived");
        Ok(permissions)
    }

    /// Checks `required` against the current session's mask.
    ///
    /// See [`Permissions::check`] for how each requirement is tested and
    /// how `mode` joins them, including the empty-list cases.
    pub fn has_permission(
        &mut self,
        required: &[Permissions],
        mode: Combine,
    ) -> Result<bool, SessionError> {
        Ok(self.own_permissions()?.check(required, mode))
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Gives the backing store back, dropping the cache.
    ///
    /// Building a new `SessionStore` over the result is how a restart
    /// looks from storage's point of view.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn hydrate_user(&mut self) -> Result<(), SessionError> {
        let Some(text) = self.storage.get(&self.config.user_key)? else {
            return Ok(());
        };
        if text.is_empty() {
            return Ok(());
        }

        match self.codec.decode::<User>(&text) {
            Ok(user) => {
                tracing::debug!(uid = ?user.uid, "user hydrated from storage");
                self.user = user;
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.config.user_key,
                    error = %e,
                    "persisted user is malformed, treating session as empty"
                );
            }
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
