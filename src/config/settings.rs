//! Configuration settings structures for flatauth
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables, plus the built-in bundle for each
//! environment that forms the lowest configuration layer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

/// Hashing secret shipped in both built-in bundles
pub const DEFAULT_HASHING_SECRET: &str = "thisIsASecret";

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "flatauth".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_env_name() -> String {
    Environment::default().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    3000
}

fn default_https_port() -> u16 {
    3001
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1MB
}

fn default_data_dir() -> String {
    ".data".to_string()
}

fn default_hashing_secret() -> String {
    DEFAULT_HASHING_SECRET.to_string()
}

fn default_cert_path() -> String {
    "https/cert.pem".to_string()
}

fn default_key_path() -> String {
    "https/key.pem".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/flatauth.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Configuration sections
// ============================================================================

/// Application identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,

    /// Name of the bundle the settings were built from
    #[serde(default = "default_env_name")]
    pub env_name: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            env_name: default_env_name(),
        }
    }
}

/// Listener configuration shared by the HTTP and HTTPS servers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_http_port")]
    pub http_port: u16,

    #[serde(default = "default_https_port")]
    pub https_port: u16,

    /// Largest request body the dispatcher will buffer
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn https_address(&self) -> String {
        format!("{}:{}", self.host, self.https_port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            https_port: default_https_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Location of the flat-file store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl StorageConfig {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Password hashing
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_hashing_secret")]
    pub hashing_secret: String,
}

impl SecurityConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.hashing_secret == DEFAULT_HASHING_SECRET
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("hashing_secret", &"<redacted>")
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            hashing_secret: default_hashing_secret(),
        }
    }
}

/// HTTPS listener certificate material (PEM files)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_cert_path")]
    pub cert_path: String,

    #[serde(default = "default_key_path")]
    pub key_path: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            cert_path: default_cert_path(),
            key_path: default_key_path(),
        }
    }
}

// ============================================================================
// Logger settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Converts the file representation into the runtime logger configuration.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        Ok(FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
        })
    }
}

// ============================================================================
// Root settings
// ============================================================================

/// Complete application settings.
///
/// Built once at start-up and passed by value into the server; nothing on
/// the request path reads configuration from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub tls: TlsConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Built-in bundle for an environment: staging listens on 3000/3001,
    /// production on 5000/5001.
    pub fn for_environment(environment: Environment) -> Self {
        let (http_port, https_port) = match environment {
            Environment::Staging => (3000, 3001),
            Environment::Production => (5000, 5001),
        };

        Self {
            application: ApplicationConfig {
                env_name: environment.to_string(),
                ..Default::default()
            },
            server: ServerConfig {
                http_port,
                https_port,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
