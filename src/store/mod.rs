//! Flat-file JSON object store.
//!
//! Every record lives at `<base-dir>/<collection>/<id>.json` and holds a
//! single JSON object. Collections are flat directories with no secondary
//! indexes; lookups go through the record's natural identifier only.

mod error;
mod file_store;

pub use error::{StoreError, StoreResult};
pub use file_store::FileStore;

use std::fmt;

/// Named group of records of one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Tokens,
}

impl Collection {
    /// Every collection the service persists.
    pub const ALL: [Collection; 2] = [Collection::Users, Collection::Tokens];

    /// Directory name under the store's base directory
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Tokens => "tokens",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
