//! Server lifecycle: start-up logging, HTTP and HTTPS listeners sharing
//! one router, graceful shutdown of both.

use std::future::IntoFuture;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tokio_rustls::rustls::ServerConfig;
use tokio_util::sync::CancellationToken;

use crate::api::create_router;
use crate::config::Settings;
use crate::state::AppState;
use crate::store::FileStore;
use crate::tls::{TlsListener, load_server_config};

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Opens the store, binds the listeners and serves until Ctrl+C or
    /// SIGTERM.
    ///
    /// # Errors
    /// - The data directory cannot be created
    /// - Certificate material exists but is unusable
    /// - A listener cannot bind its address
    pub async fn run(self) -> anyhow::Result<()> {
        self.log_configuration();

        let store = FileStore::open(self.settings.storage.data_path()).await?;
        tracing::info!(data_dir = %store.base_dir().display(), "Object store ready");

        let router = create_router(AppState::new(store, &self.settings));
        let tls_config = self.tls_config()?;

        let shutdown = CancellationToken::new();
        tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                shutdown_signal().await;
                shutdown.cancel();
            }
        });

        let http_address = self.settings.server.http_address();
        let http_listener = bind(&http_address).await?;
        tracing::info!(
            address = %http_address,
            env = %self.settings.application.env_name,
            "HTTP server listening"
        );
        let http = axum::serve(http_listener, router.clone())
            .with_graceful_shutdown(shutdown.clone().cancelled_owned())
            .into_future();

        match tls_config {
            Some(tls_config) => {
                let https_address = self.settings.server.https_address();
                let https_listener = TlsListener::new(bind(&https_address).await?, tls_config)?;
                tracing::info!(
                    address = %https_address,
                    env = %self.settings.application.env_name,
                    "HTTPS server listening"
                );
                let https = axum::serve(https_listener, router)
                    .with_graceful_shutdown(shutdown.clone().cancelled_owned())
                    .into_future();

                tokio::try_join!(http, https)?;
            }
            None => http.await?,
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn log_configuration(&self) {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %settings.application.env_name,
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            http_port = settings.server.http_port,
            https_port = settings.server.https_port,
            max_body_bytes = settings.server.max_body_bytes,
            "Server configuration loaded"
        );

        // The secret itself is never logged
        tracing::info!(
            secret_configured = !settings.security.hashing_secret.is_empty(),
            "Security configuration loaded"
        );
        if settings.security.uses_default_secret() {
            tracing::warn!("Using the built-in hashing secret; set security.hashing_secret");
        }

        tracing::info!(
            level = %settings.logger.level,
            console_enabled = settings.logger.console.enabled,
            file_enabled = settings.logger.file.enabled,
            "Logger configuration loaded"
        );
    }

    /// `None` when HTTPS is switched off or its certificate files are absent.
    fn tls_config(&self) -> anyhow::Result<Option<Arc<ServerConfig>>> {
        let tls = &self.settings.tls;
        if !tls.enabled {
            tracing::warn!("TLS is disabled, serving HTTP only");
            return Ok(None);
        }

        let cert_path = Path::new(&tls.cert_path);
        let key_path = Path::new(&tls.key_path);
        if !cert_path.is_file() || !key_path.is_file() {
            tracing::warn!(
                cert_path = %cert_path.display(),
                key_path = %key_path.display(),
                "TLS certificate or key not found, serving HTTP only"
            );
            return Ok(None);
        }

        let config = load_server_config(cert_path, key_path)?;
        tracing::info!(cert_path = %cert_path.display(), "TLS certificate loaded");
        Ok(Some(config))
    }
}

async fn bind(address: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(address).await.map_err(|e| {
        tracing::error!(error = %e, address = %address, "Failed to bind to address");
        anyhow::anyhow!("Failed to bind to {address}: {e}")
    })
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::TlsConfig;

    #[test]
    fn test_tls_disabled() {
        let mut settings = Settings::default();
        settings.tls.enabled = false;
        assert!(Server::new(settings).tls_config().unwrap().is_none());
    }

    #[test]
    fn test_tls_files_missing_falls_back_to_http() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = Settings {
            tls: TlsConfig {
                enabled: true,
                cert_path: dir.path().join("cert.pem").display().to_string(),
                key_path: dir.path().join("key.pem").display().to_string(),
            },
            ..Default::default()
        };
        assert!(Server::new(settings).tls_config().unwrap().is_none());
    }

    #[test]
    fn test_tls_unusable_material_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let cert_path = dir.path().join("cert.pem");
        let key_path = dir.path().join("key.pem");
        std::fs::write(&cert_path, "garbage").unwrap();
        std::fs::write(&key_path, "garbage").unwrap();

        let settings = Settings {
            tls: TlsConfig {
                enabled: true,
                cert_path: cert_path.display().to_string(),
                key_path: key_path.display().to_string(),
            },
            ..Default::default()
        };
        assert!(Server::new(settings).tls_config().is_err());
    }
}
