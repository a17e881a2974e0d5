//! Chrome native messaging frame codec.
//!
//! The browser talks to a native host over stdin/stdout using a fixed
//! framing: a 4-byte native-endian unsigned length prefix followed by that
//! many bytes of UTF-8 JSON. One request frame arrives per host
//! invocation and at most one response frame goes back.
//!
//! Read-side contract:
//! - end of input before a full prefix is "no message"
//! - a zero-length prefix is "no message"
//! - a payload shorter than the prefix promised is "no message"
//! - a full frame whose payload is not valid JSON is an error, which the
//!   host answers with an error response since a frame was consumed
//!
//! The codec is generic over [`AsyncRead`]/[`AsyncWrite`] so tests can run
//! it against in-memory buffers instead of real process pipes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// A request from the browser extension.
///
/// Only the `action` field is meaningful; a missing field defaults to the
/// empty string, which dispatch then rejects as an unknown action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostRequest {
    /// Requested action, matched case-insensitively after trimming
    #[serde(default)]
    pub action: String,
}

impl HostRequest {
    /// The action normalized for dispatch: trimmed and lowercased.
    pub fn normalized_action(&self) -> String {
        self.action.trim().to_lowercase()
    }
}

/// The response returned to the browser extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostResponse {
    /// Whether the requested action succeeded
    pub success: bool,
    /// Human-readable result or error text
    pub message: String,
}

impl HostResponse {
    /// A successful response carrying a result message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed response carrying an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Read one framed request, or `None` when no message is present.
///
/// # Errors
///
/// Fails only when a complete frame was read but its payload is not valid
/// JSON, or on an I/O error other than a clean end of input.
pub async fn read_message<R>(reader: &mut R) -> Result<Option<HostRequest>>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    match reader.read_exact(&mut prefix).await {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err).context("Failed to read message length prefix"),
    }

    let length = u32::from_ne_bytes(prefix) as usize;
    if length == 0 {
        return Ok(None);
    }

    let mut payload = vec![0u8; length];
    match reader.read_exact(&mut payload).await {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err).context("Failed to read message payload"),
    }

    let request: HostRequest =
        serde_json::from_slice(&payload).context("Request payload is not valid JSON")?;
    debug!("received request frame: action={:?}", request.action);
    Ok(Some(request))
}

/// Write one framed response and flush it.
pub async fn write_message<W>(writer: &mut W, response: &HostResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let payload = serde_json::to_vec(response).context("Failed to serialize response")?;
    let length = u32::try_from(payload.len()).context("Response too large to frame")?;

    writer
        .write_all(&length.to_ne_bytes())
        .await
        .context("Failed to write response length prefix")?;
    writer
        .write_all(&payload)
        .await
        .context("Failed to write response payload")?;
    writer.flush().await.context("Failed to flush response")?;

    debug!("wrote response frame: success={}", response.success);
    Ok(())
}
