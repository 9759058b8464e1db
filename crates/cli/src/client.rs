// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot exchange client for an RQE node.
//!
//! Every exchange owns exactly one connection: connect → send one
//! request → receive one response → close. Connections are never pooled
//! or reused, so independent exchanges can run concurrently without
//! coordination.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use rqe_wire::{
    read_response, write_request, ModelError, OutcomeStatus, ProtocolError, Request, Response,
};

use crate::exit_error::codes;
use crate::tls::{self, TlsError};

/// Errors from a single request/response exchange.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connect to {endpoint} failed: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("mismatched response: sent {requested}, received {received}")]
    KindMismatch {
        requested: &'static str,
        received: &'static str,
    },

    #[error("server rejected request: {reason}")]
    ServerRejected { reason: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ClientError {
    /// Process exit code for this failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ServerRejected { .. } => codes::SERVER_REJECTED,
            Self::KindMismatch { .. } => codes::KIND_MISMATCH,
            Self::Protocol(ProtocolError::Timeout(_)) => codes::TIMEOUT,
            Self::Protocol(_) => codes::TRANSPORT,
            Self::Connect { .. } | Self::Tls(_) => codes::CONNECT,
            Self::Model(_) => codes::TREE_TOO_DEEP,
        }
    }
}

/// Client for one RQE endpoint. Cheap to construct; holds no connection.
pub struct RqeClient {
    host: String,
    port: u16,
    ca_cert: Option<PathBuf>,
    timeout: Duration,
}

impl RqeClient {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        ca_cert: Option<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self { host: host.into(), port, ca_cert, timeout }
    }

    /// Perform one request/response exchange over a fresh TLS connection.
    ///
    /// The connection is dropped on every exit path; a failed exchange
    /// never leaves a half-used connection behind.
    pub async fn exchange(&self, request: &Request) -> Result<Response, ClientError> {
        let endpoint = format!("{}:{}", self.host, self.port);
        let connector = tls::connector(self.ca_cert.as_deref())?;
        let server_name = tls::server_name(&self.host)?;

        let connect = async {
            let tcp = TcpStream::connect(&endpoint).await?;
            connector.connect(server_name, tcp).await
        };
        let mut stream = timeout(self.timeout, connect)
            .await
            .map_err(|_| ProtocolError::Timeout(self.timeout))?
            .map_err(|source| ClientError::Connect { endpoint: endpoint.clone(), source })?;

        debug!(endpoint = %endpoint, kind = request.kind(), "sending request");
        let response = exchange_over(&mut stream, request, self.timeout).await?;
        debug!(kind = response.kind(), "received response");
        Ok(response)
    }

    /// Map a non-OK outcome status to `ServerRejected`.
    pub(crate) fn accepted(status: OutcomeStatus) -> Result<(), ClientError> {
        match status {
            OutcomeStatus::Ok => Ok(()),
            OutcomeStatus::Failed { reason } => Err(ClientError::ServerRejected { reason }),
        }
    }

    /// Fail a query whose response kind does not match the request kind.
    pub(crate) fn reject<T>(
        requested: &'static str,
        received: &Response,
    ) -> Result<T, ClientError> {
        Err(ClientError::KindMismatch { requested, received: received.kind() })
    }
}

/// Send one request and receive one response on an established stream.
///
/// Strict sequence, no pipelining. Generic over the stream so tests can
/// drive it over in-memory pipes.
pub(crate) async fn exchange_over<S>(
    stream: &mut S,
    request: &Request,
    limit: Duration,
) -> Result<Response, ProtocolError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    write_request(stream, request, limit).await?;
    read_response(stream, limit).await
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
