//! Client-side session state for the OA application.
//!
//! This crate keeps track of who is signed in:
//!
//! 1. **Caching** — the current [`User`](oa_model::User) and access token
//!    live in memory and are rehydrated lazily from a
//!    [`KeyValueStore`](oa_storage::KeyValueStore) ([`SessionStore`])
//! 2. **Persistence** — every change is written straight through, so a
//!    restart picks the session back up
//! 3. **Permissions** — a small bitmask derived from the user's department
//!    ([`Permissions`]) and checked against requirements ([`Combine`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Application (above)  ← asks "who is this?" and "may they do X?"
//!     ↕
//! Session Layer (this crate)  ← cache, validity, permission mask
//!     ↕
//! Model + Storage (below)  ← User ⇄ text, key → text
//! ```
//!
//! The token is opaque. Nothing here validates, refreshes, or expires it.

mod config;
mod error;
mod permission;
mod store;

pub use config::SessionConfig;
pub use error::SessionError;
pub use permission::{Combine, Permissions};
pub use store::SessionStore;
