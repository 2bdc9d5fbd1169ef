//! HTTPS listener: PEM certificate loading and a TLS-terminating
//! [`Listener`] for `axum::serve`.

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::serve::Listener;
use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::{self, ServerConfig, crypto::ring};
use tokio_rustls::server::TlsStream;

/// Upper bound on a single TLS handshake.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("Could not read certificates from {path}: {source}")]
    Certificates {
        path: String,
        #[source]
        source: rustls_pki_types::pem::Error,
    },

    #[error("No certificates found in {path}")]
    NoCertificates { path: String },

    #[error("Could not read private key from {path}: {source}")]
    PrivateKey {
        path: String,
        #[source]
        source: rustls_pki_types::pem::Error,
    },

    #[error("Invalid TLS configuration: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Builds a server config from a PEM certificate chain and private key.
pub fn load_server_config(cert_path: &Path, key_path: &Path) -> Result<Arc<ServerConfig>, TlsError> {
    let certificates = CertificateDer::pem_file_iter(cert_path)
        .and_then(|certs| certs.collect::<Result<Vec<_>, _>>())
        .map_err(|source| TlsError::Certificates {
            path: cert_path.display().to_string(),
            source,
        })?;

    if certificates.is_empty() {
        return Err(TlsError::NoCertificates {
            path: cert_path.display().to_string(),
        });
    }

    let key = PrivateKeyDer::from_pem_file(key_path).map_err(|source| TlsError::PrivateKey {
        path: key_path.display().to_string(),
        source,
    })?;

    let mut config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certificates, key)?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}

/// Pending handshakes that may finish before axum asks for the next
/// connection.
const ACCEPT_QUEUE: usize = 64;

/// TLS-terminating listener for `axum::serve`.
///
/// A background task accepts TCP connections and runs every handshake in
/// its own task, so an idle or slow client only holds up itself. Completed
/// streams are queued for [`Listener::accept`]. Failed or stalled
/// handshakes are logged and dropped.
pub struct TlsListener {
    connections: mpsc::Receiver<(TlsStream<TcpStream>, SocketAddr)>,
    local_addr: SocketAddr,
}

impl TlsListener {
    /// Must be called inside a Tokio runtime.
    pub fn new(inner: TcpListener, config: Arc<ServerConfig>) -> io::Result<Self> {
        let local_addr = inner.local_addr()?;
        let (sender, connections) = mpsc::channel(ACCEPT_QUEUE);
        tokio::spawn(accept_loop(inner, TlsAcceptor::from(config), sender));

        Ok(Self {
            connections,
            local_addr,
        })
    }
}

/// Runs until the listener is dropped.
async fn accept_loop(
    mut inner: TcpListener,
    acceptor: TlsAcceptor,
    sender: mpsc::Sender<(TlsStream<TcpStream>, SocketAddr)>,
) {
    loop {
        let (stream, addr) = tokio::select! {
            _ = sender.closed() => break,
            accepted = Listener::accept(&mut inner) => accepted,
        };

        let acceptor = acceptor.clone();
        let sender = sender.clone();
        tokio::spawn(async move {
            match tokio::time::timeout(HANDSHAKE_TIMEOUT, acceptor.accept(stream)).await {
                Ok(Ok(tls_stream)) => {
                    if sender.send((tls_stream, addr)).await.is_err() {
                        tracing::debug!(peer = %addr, "HTTPS listener closed, dropping connection");
                    }
                }
                Ok(Err(e)) => {
                    tracing::debug!(peer = %addr, error = %e, "TLS handshake failed");
                }
                Err(_) => {
                    tracing::debug!(peer = %addr, "TLS handshake timed out");
                }
            }
        });
    }
}

impl Listener for TlsListener {
    type Io = TlsStream<TcpStream>;
    type Addr = SocketAddr;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        match self.connections.recv().await {
            Some(connection) => connection,
            None => {
                tracing::error!(address = %self.local_addr, "HTTPS accept loop stopped");
                std::future::pending().await
            }
        }
    }

    fn local_addr(&self) -> io::Result<Self::Addr> {
        Ok(self.local_addr)
    }
}
