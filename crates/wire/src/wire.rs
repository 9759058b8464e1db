// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefix framing and JSON codec for the RQE protocol.
//!
//! A message is a 4-byte big-endian length followed by that many payload
//! bytes. Framing never trusts a declared length beyond
//! [`MAX_MESSAGE_SIZE`], and always loops across partial reads and
//! writes; a byte stream gives no message boundaries of its own.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::request::Request;
use crate::response::Response;

/// Ceiling on a single message's payload, checked before any allocation.
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Errors from framing and message encoding.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    #[error("malformed message: {0}")]
    MalformedMessage(serde_json::Error),

    #[error("unknown message variant: {0}")]
    UnknownVariant(String),

    #[error("message size {size} exceeds maximum {max}")]
    MessageTooLarge { size: usize, max: usize },

    #[error("connection closed mid-message")]
    UnexpectedEof,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Encode a message payload as JSON (no length prefix).
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(message).map_err(ProtocolError::Encode)
}

/// Decode a JSON message payload.
///
/// Structurally invalid input is `MalformedMessage`; a well-formed
/// envelope with an unrecognized tag is `UnknownVariant` — the client
/// cannot safely guess what the server meant, so unknown tags are a
/// hard error.
pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_slice(payload).map_err(ProtocolError::MalformedMessage)?;
    serde_json::from_value(value).map_err(|err| {
        let text = err.to_string();
        if text.starts_with("unknown variant") {
            ProtocolError::UnknownVariant(text)
        } else {
            ProtocolError::MalformedMessage(err)
        }
    })
}

/// Write one length-prefixed message.
///
/// Oversized payloads are rejected before any bytes hit the stream.
pub async fn write_message<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: payload.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    // Checked above; MAX_MESSAGE_SIZE fits in u32.
    let len = payload.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed message.
///
/// The declared length is validated against [`MAX_MESSAGE_SIZE`] before
/// the payload buffer is allocated. A stream that closes mid-message
/// yields `UnexpectedEof`.
pub async fn read_message<R>(reader: &mut R) -> Result<Vec<u8>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await.map_err(map_eof)?;

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge { size: len, max: MAX_MESSAGE_SIZE });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await.map_err(map_eof)?;
    Ok(payload)
}

fn map_eof(err: std::io::Error) -> ProtocolError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        ProtocolError::UnexpectedEof
    } else {
        ProtocolError::Io(err)
    }
}

/// Encode and send one request, bounded by `limit`.
pub async fn write_request<W>(
    writer: &mut W,
    request: &Request,
    limit: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let payload = encode(request)?;
    timeout(limit, write_message(writer, &payload))
        .await
        .map_err(|_| ProtocolError::Timeout(limit))?
}

/// Receive and decode one request, bounded by `limit` (server side).
pub async fn read_request<R>(reader: &mut R, limit: Duration) -> Result<Request, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let payload = timeout(limit, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout(limit))??;
    decode(&payload)
}

/// Encode and send one response, bounded by `limit` (server side).
pub async fn write_response<W>(
    writer: &mut W,
    response: &Response,
    limit: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let payload = encode(response)?;
    timeout(limit, write_message(writer, &payload))
        .await
        .map_err(|_| ProtocolError::Timeout(limit))?
}

/// Receive and decode one response, bounded by `limit`.
pub async fn read_response<R>(reader: &mut R, limit: Duration) -> Result<Response, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let payload = timeout(limit, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout(limit))??;
    decode(&payload)
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
