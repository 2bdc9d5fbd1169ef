//! Configuration loader for flatauth
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "FLATAUTH_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "FLATAUTH_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "FLATAUTH";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Loads [`Settings`] from layered sources, lowest priority first:
///
/// 1. the built-in bundle of the selected environment
/// 2. `default.toml`, `{environment}.toml` and `local.toml` from the
///    configuration directory, all optional; or a single file when one is
///    selected
/// 3. `FLATAUTH_*` environment variables, `__` separating nested keys
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Single configuration file; skips the directory layers when set
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `FLATAUTH_CONFIG_DIR`, `FLATAUTH_CONFIG_FILE`
    /// and `FLATAUTH_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `FLATAUTH_CONFIG_DIR` and
    /// `FLATAUTH_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "FLATAUTH_CONFIG_DIR and FLATAUTH_CONFIG_FILE cannot both be set. \
                 Use FLATAUTH_CONFIG_DIR for layered configuration or \
                 FLATAUTH_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Overrides the environment read from `FLATAUTH_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Loads exactly this file instead of the directory layers.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load and validate configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly selected file is missing, a source
    /// fails to parse, or the merged settings are invalid.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Merges all sources without validating the result, for callers that
    /// apply further overrides and validate afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly selected file is missing or a
    /// source fails to parse.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {e}"))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let bundle = Settings::for_environment(self.environment);
        let builder = Config::builder().add_source(Config::try_from(&bundle)?);

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.add_directory_sources(builder)?,
        };

        // FLATAUTH_SERVER__HTTP_PORT -> server.http_port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_directory_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, false)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!(
                "Configuration path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Loader tests read process-wide environment variables
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const MANAGED_VARS: &[&str] = &[
        CONFIG_DIR_ENV,
        CONFIG_FILE_ENV,
        AppEnvironment::ENV_VAR,
        "FLATAUTH_SERVER__HTTP_PORT",
        "FLATAUTH_SECURITY__HASHING_SECRET",
    ];

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores every touched variable on drop.
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Starts from a clean slate for all loader variables.
        fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in MANAGED_VARS {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_loader_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Staging);
    }

    #[test]
    fn test_loader_mutual_exclusivity_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("FLATAUTH_CONFIG_DIR"));
                assert!(msg.contains("FLATAUTH_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_without_files_uses_bundle() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.http_port, 5000);
        assert_eq!(settings.server.https_port, 5001);
        assert_eq!(settings.application.env_name, "production");
    }

    #[test]
    fn test_load_layer_precedence() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            (
                "default.toml",
                "[server]\nhost = \"0.0.0.0\"\nhttp_port = 4000\n\n[storage]\ndata_dir = \"/srv/default\"\n",
            ),
            ("staging.toml", "[server]\nhttp_port = 4100\n"),
            ("production.toml", "[server]\nhttp_port = 9999\n"),
            ("local.toml", "[storage]\ndata_dir = \"/srv/local\"\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("FLATAUTH_SECURITY__HASHING_SECRET", "from-env");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.http_port, 4100);
        assert_eq!(settings.server.https_port, 3001);
        assert_eq!(settings.storage.data_dir, "/srv/local");
        assert_eq!(settings.security.hashing_secret, "from-env");
    }

    #[test]
    fn test_load_unvalidated_defers_validation() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[(
            "flatauth.toml",
            "[server]\nhttp_port = 4000\nhttps_port = 4000\n",
        )]);
        let loader = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("flatauth.toml"));

        assert!(matches!(
            loader.load(),
            Err(ConfigError::ValidationError { .. })
        ));

        let settings = loader.load_unvalidated().unwrap();
        assert_eq!(settings.server.http_port, 4000);
        assert_eq!(settings.server.https_port, 4000);
    }

    #[test]
    fn test_env_var_overrides_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", "[server]\nhttp_port = 4000\n")]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("FLATAUTH_SERVER__HTTP_PORT", "4200");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.http_port, 4200);
    }

    #[test]
    fn test_single_file_mode() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            ("custom.toml", "[server]\nhttps_port = 8443\n"),
            ("default.toml", "[server]\nhttp_port = 1\n"),
        ]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("custom.toml"))
            .with_environment(AppEnvironment::Production)
            .load()
            .unwrap();
        assert_eq!(settings.server.http_port, 5000);
        assert_eq!(settings.server.https_port, 8443);
    }

    #[test]
    fn test_single_file_missing() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set(CONFIG_FILE_ENV, "/nonexistent/flatauth.toml");

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::FileNotFound(path)) => assert!(path.contains("flatauth.toml")),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_merged_settings_are_rejected() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[(
            "default.toml",
            "[server]\nhttp_port = 3001\nhttps_port = 3001\n",
        )]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        assert!(matches!(
            ConfigLoader::new().unwrap().load(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
