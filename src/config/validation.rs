//! Configuration validation logic
//!
//! Checks run once after all layers are merged, before the server starts.

use crate::config::error::ConfigError;
use crate::config::settings::{
    FileSettings, LoggerSettings, SecurityConfig, ServerConfig, Settings, StorageConfig,
    TlsConfig,
};
use crate::logger::VALID_LOG_LEVELS;

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Both ports non-zero and distinct, host and body limit non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host cannot be empty. Use 0.0.0.0 to listen on all interfaces.",
            ));
        }

        if self.http_port == 0 {
            return Err(ConfigError::validation(
                "server.http_port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.https_port == 0 {
            return Err(ConfigError::validation(
                "server.https_port",
                "Port must be between 1 and 65535.",
            ));
        }

        if self.http_port == self.https_port {
            return Err(ConfigError::validation(
                "server.https_port",
                format!(
                    "HTTP and HTTPS listeners cannot share port {}.",
                    self.http_port
                ),
            ));
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::validation(
                "server.max_body_bytes",
                "Maximum body size must be greater than 0 bytes.",
            ));
        }

        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::validation(
                "storage.data_dir",
                "Data directory is required.",
            ));
        }
        Ok(())
    }
}

impl SecurityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hashing_secret.is_empty() {
            return Err(ConfigError::validation(
                "security.hashing_secret",
                "Hashing secret cannot be empty.",
            ));
        }

        Ok(())
    }
}

impl TlsConfig {
    /// Paths are only required when TLS is enabled. Whether the files
    /// exist is checked when the HTTPS listener starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.cert_path.trim().is_empty() {
            return Err(ConfigError::validation(
                "tls.cert_path",
                "Certificate path is required when TLS is enabled.",
            ));
        }

        if self.key_path.trim().is_empty() {
            return Err(ConfigError::validation(
                "tls.key_path",
                "Private key path is required when TLS is enabled.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "Log file path is required when file output is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validates every section, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.security.validate()?;
        self.tls.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
