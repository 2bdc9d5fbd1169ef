//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of the loaded configuration.
///
/// CLI arguments take precedence over environment variables, which take
/// precedence over configuration files and the built-in bundle.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration, honoring `--env` and `--config`.
    /// Validation waits for [`merge_cli_args`](Self::merge_cli_args) so a
    /// CLI flag can repair a value from a file or the environment.
    ///
    /// # Errors
    /// Returns ConfigError if a source is missing or fails to parse
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Merge CLI arguments with the base configuration and validate the
    /// result.
    ///
    /// Precedence for the log level: `serve --log-level`, then
    /// `--verbose`/`--quiet`, then configuration.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        apply_global_overrides(&mut config, cli);
        if let Some(ref command) = cli.command {
            apply_command_overrides(&mut config, command);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
    if cli.verbose {
        config.logger.level = "debug".to_string();
    } else if cli.quiet {
        config.logger.level = "error".to_string();
    }
}

fn apply_command_overrides(config: &mut Settings, command: &Commands) {
    match command {
        Commands::Serve {
            host,
            http_port,
            https_port,
            data_dir,
            log_level,
            dry_run: _,
        } => {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = http_port {
                config.server.http_port = *port;
            }
            if let Some(port) = https_port {
                config.server.https_port = *port;
            }
            if let Some(dir) = data_dir {
                config.storage.data_dir = dir.display().to_string();
            }
            if let Some(level) = log_level {
                config.logger.level = (*level).into();
            }
        }
    }
}
