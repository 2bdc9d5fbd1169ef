//! Persisted records.
//!
//! Field names are camelCase both on disk and on the wire.

mod token;
mod user;

pub use token::{TOKEN_ID_LENGTH, TOKEN_TTL_MS, Token};
pub use user::{NewUser, User, UserChanges, UserProfile};
