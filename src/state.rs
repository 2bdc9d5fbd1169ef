//! Application state for the Axum router.
//!
//! Holds the services built once at start-up; handlers never reach for
//! ambient configuration.

use crate::config::Settings;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::store::FileStore;
use crate::utils::PasswordHasher;

/// Shared state handed to the dispatcher through Axum's `State` extractor.
///
/// Cloning is cheap since every service shares the store through an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Upper bound on the request body the dispatcher buffers
    pub max_body_bytes: usize,
}

impl AppState {
    /// Wires repositories and services over an opened store.
    pub fn new(store: FileStore, settings: &Settings) -> Self {
        let repos = Repositories::new(store);
        let hasher = PasswordHasher::new(&settings.security.hashing_secret);
        let services = Services::new(repos, hasher);
        Self {
            services,
            max_body_bytes: settings.server.max_body_bytes,
        }
    }
}
