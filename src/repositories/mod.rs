//! Repository layer for data access operations.
//!
//! Typed wrappers over the object store, one per collection.

mod token_repo;
mod user_repo;

pub use token_repo::TokenRepository;
pub use user_repo::UserRepository;

use crate::store::FileStore;

/// Aggregates all repositories for convenient access.
///
/// Since `FileStore` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub tokens: TokenRepository,
}

impl Repositories {
    pub fn new(store: FileStore) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            tokens: TokenRepository::new(store),
        }
    }
}
