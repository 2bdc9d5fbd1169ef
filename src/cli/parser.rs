//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Flat-file user and token service
#[derive(Parser, Debug)]
#[command(name = "flatauth")]
#[command(about = "Flat-file user and token service over HTTP and HTTPS")]
#[command(long_about = "
flatauth serves a small JSON API for user accounts and session tokens.
Records are stored as one JSON file each under the configured data
directory. The same API is served over HTTP and, when a certificate is
configured, HTTPS.

EXAMPLES:
    # Start the server with the staging bundle
    flatauth serve

    # Production ports (5000/5001) with a custom data directory
    flatauth --env production serve --data-dir /var/lib/flatauth

    # Use a custom configuration file
    flatauth --config /etc/flatauth/flatauth.toml serve

    # Check configuration without starting the server
    flatauth serve --dry-run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files under `config/`.
    /// The file must exist and be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the built-in configuration bundle and the
    /// `config/{environment}.toml` layer. Defaults to FLATAUTH_APP_ENV,
    /// then staging.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level). Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP and HTTPS listeners (default)
    ///
    /// Examples:
    ///   flatauth serve                               # Start with defaults
    ///   flatauth serve --host 0.0.0.0 --http-port 80 # All interfaces on port 80
    ///   flatauth serve --dry-run                     # Validate config without starting
    Serve {
        /// Host address both listeners bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port of the plain HTTP listener
        #[arg(long, value_name = "PORT", value_parser = super::validation::validate_port)]
        http_port: Option<u16>,

        /// Port of the HTTPS listener
        #[arg(long, value_name = "PORT", value_parser = super::validation::validate_port)]
        https_port: Option<u16>,

        /// Directory holding the `users` and `tokens` collections
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// Log level override; takes precedence over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Returns exit code 0 if the merged configuration is valid,
        /// non-zero otherwise.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
