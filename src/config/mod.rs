//! Configuration management for flatauth
//!
//! Settings are layered, lowest priority first:
//! 1. built-in bundle of the environment (`staging` or `production`)
//! 2. `default.toml`, `{environment}.toml`, `local.toml`
//! 3. `FLATAUTH_*` environment variables
//! 4. command-line flags (applied by the CLI)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::Settings;
