//! # oa-auth
//!
//! Client-side session and permission store for the OA application.
//!
//! Holds the signed-in user and their access token, persists both so a
//! restart picks the session back up, and answers "may this user do X?"
//! from a small role bitmask.
//!
//! ## Quick Start
//!
//! ```rust
//! use oa_auth::prelude::*;
//!
//! let mut session = SessionStoreBuilder::new().build()?;
//!
//! let user = User::new(5).with_department(Department::new("董事会").with_leader(9));
//! session.set_session(user, "opaque-token")?;
//!
//! assert!(session.is_logged_in()?);
//! assert_eq!(session.own_permissions()?, Permissions::BOARDER);
//! assert!(session.has_permission(&[Permissions::BOARDER, Permissions::LEADER], Combine::Any)?);
//! # Ok::<(), oa_auth::AuthError>(())
//! ```

mod builder;
mod error;

pub use builder::{DynSessionStore, SessionStoreBuilder};
pub use error::AuthError;

/// Installs a `tracing` subscriber that prints to stderr.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Calling it
/// more than once is harmless; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub mod prelude {
    pub use crate::{AuthError, DynSessionStore, SessionStoreBuilder};
    pub use oa_model::{Codec, Department, JsonCodec, User, UserId};
    pub use oa_session::{Combine, Permissions, SessionConfig, SessionStore};
    pub use oa_storage::{FileStore, KeyValueStore, MemoryStore};
}
