//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Execute a CLI command with the given settings
///
/// Running without a subcommand is the same as `serve`.
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    warn_on_privileged_ports(&settings);

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
    }
}

fn warn_on_privileged_ports(settings: &Settings) {
    let server = &settings.server;
    for port in [server.http_port, server.https_port] {
        if port < 1024 {
            tracing::warn!(port, "Binding to a port below 1024 may require elevated privileges");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["flatauth", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, Settings::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_dry_run_rejects_invalid_settings() {
        let cli = Cli::try_parse_from(["flatauth", "serve", "--dry-run"]).unwrap();
        let mut settings = Settings::default();
        settings.security.hashing_secret.clear();

        assert!(execute_command(&cli, settings).await.is_err());
    }
}
