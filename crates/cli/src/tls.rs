// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TLS client configuration.
//!
//! Trust is CA-pinned: the operator supplies a PEM CA bundle
//! (`--ca-cert` or `RQE_CA_CERT`) and the server certificate must chain
//! to it. Server authentication only; the client presents no
//! certificate.

use std::path::Path;
use std::sync::{Arc, Once};

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::{ClientConfig, RootCertStore};
use thiserror::Error;
use tokio_rustls::TlsConnector;

/// Errors from TLS configuration.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("CA certificate required (set --ca-cert or RQE_CA_CERT)")]
    CaRequired,

    #[error("failed to read CA certificate {path}: {source}")]
    CaRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("certificate error: {0}")]
    Certificate(String),

    #[error("invalid server name {0:?}")]
    ServerName(String),
}

static CRYPTO_INIT: Once = Once::new();

/// Install the ring crypto provider process-wide, once.
fn init_crypto() {
    CRYPTO_INIT.call_once(|| {
        // Err means another provider is already installed, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Build a TLS connector trusting the CA bundle at `ca_cert`.
pub fn connector(ca_cert: Option<&Path>) -> Result<TlsConnector, TlsError> {
    let path = ca_cert.ok_or(TlsError::CaRequired)?;
    init_crypto();

    let pem = std::fs::read(path).map_err(|source| TlsError::CaRead {
        path: path.display().to_string(),
        source,
    })?;
    let certs = CertificateDer::pem_slice_iter(&pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TlsError::Certificate(format!("failed to parse certificates: {e}")))?;
    if certs.is_empty() {
        return Err(TlsError::Certificate(format!(
            "no CA certificates found in {}",
            path.display()
        )));
    }

    let mut roots = RootCertStore::empty();
    for cert in certs {
        roots
            .add(cert)
            .map_err(|e| TlsError::Certificate(format!("failed to add CA certificate: {e}")))?;
    }

    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(TlsConnector::from(Arc::new(config)))
}

/// Resolve the TLS server name presented during the handshake.
pub fn server_name(host: &str) -> Result<ServerName<'static>, TlsError> {
    ServerName::try_from(host.to_string()).map_err(|_| TlsError::ServerName(host.to_string()))
}

#[cfg(test)]
#[path = "tls_tests.rs"]
mod tests;
