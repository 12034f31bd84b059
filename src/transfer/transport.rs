// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Byte transport for transfer operations.
//!
//! The seam exists so transfer flows can run against an in-memory transport
//! in tests; production uses [`HttpTransport`] backed by reqwest.

use std::time::Duration;

use futures_util::StreamExt;

/// Default timeout for byte transfers (in seconds).
const TRANSFER_TIMEOUT_SECS: u64 = 120;

/// Default timeout for establishing a connection (in seconds).
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Transport-level transfer failure.
#[derive(Debug, Clone)]
pub enum TransportError {
    /// DNS, connection, or timeout failure.
    Network(String),
    /// The remote answered with a non-2xx status.
    Status(u16),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Transfer returned status {}", code),
        }
    }
}

impl std::error::Error for TransportError {}

/// Fetches the raw bytes behind a URI.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Retrieve the full body for `uri`. Non-2xx statuses are errors.
    async fn fetch_bytes(&self, uri: &str) -> Result<Vec<u8>, TransportError>;
}

/// HTTP transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with default timeouts.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(TRANSFER_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    async fn fetch_bytes(&self, uri: &str) -> Result<Vec<u8>, TransportError> {
        tracing::debug!(%uri, "transferring remote bytes");

        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        // Stream the body rather than buffering it in one read; images can
        // be large.
        let mut stream = response.bytes_stream();
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| TransportError::Network(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}
