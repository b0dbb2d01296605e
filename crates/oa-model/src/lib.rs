//! Data model for the OA session store.
//!
//! This crate defines what a session *holds* and how it is written down:
//!
//! - **Types** ([`User`], [`Department`], [`UserId`]) — the user record the
//!   login endpoint hands back and the session keeps around.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how a record is turned
//!   into the text that lands in the backing store, and back.
//! - **Errors** ([`ModelError`]) — what can go wrong while doing so.
//!
//! ```text
//! Session (cache + permissions) → Model (User ⇄ text) → Storage (key → text)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ModelError;
pub use types::{Department, User, UserId};
