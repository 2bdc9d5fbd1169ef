//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::Settings;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server, or only validates and summarizes the configuration
    /// when `dry_run` is set.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        for line in self.summary() {
            println!("✓ {line}");
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Human-readable configuration summary. The hashing secret is never
    /// included.
    fn summary(&self) -> Vec<String> {
        let config = &self.config;
        let tls = if config.tls.enabled {
            format!(
                "HTTPS would bind to: {} (cert: {}, key: {})",
                config.server.https_address(),
                config.tls.cert_path,
                config.tls.key_path
            )
        } else {
            "HTTPS is disabled".to_string()
        };

        vec![
            format!("Environment: {}", config.application.env_name),
            format!("HTTP would bind to: {}", config.server.http_address()),
            tls,
            format!("Data directory: {}", config.storage.data_path().display()),
            format!("Log level: {}", config.logger.level),
        ]
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_handler_new() {
        let config = Settings::default();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = Settings::default();
        config.server.http_port = 0;
        let handler = ServeCommandHandler::new(config);
        assert!(handler.execute(true).await.is_err());
    }

    #[test]
    fn test_summary_omits_secret() {
        let mut config = Settings::default();
        config.security.hashing_secret = "super-secret-value".to_string();
        config.tls.enabled = false;

        let summary = ServeCommandHandler::new(config).summary().join("\n");
        assert!(!summary.contains("super-secret-value"));
        assert!(summary.contains("HTTPS is disabled"));
        assert!(summary.contains("127.0.0.1:3000"));
    }
}
