//! Service layer for business logic operations.
//!
//! Services sit between the HTTP handlers and the repositories. They hold
//! no per-request state; every request is rebuilt from the store.

mod token_service;
mod user_service;

pub use token_service::TokenService;
pub use user_service::UserService;

use crate::repositories::Repositories;
use crate::utils::PasswordHasher;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since repositories share the store through an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub tokens: TokenService,
}

impl Services {
    /// Builds every service from the repositories and the shared
    /// password hasher.
    pub fn new(repos: Repositories, hasher: PasswordHasher) -> Self {
        Self {
            users: UserService::new(repos.users.clone(), hasher.clone()),
            tokens: TokenService::new(repos.users, repos.tokens, hasher),
        }
    }
}
