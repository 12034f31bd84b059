// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Download flow: permission, transfer, gallery registration.

use std::path::PathBuf;

use super::platform::Platform;
use super::transport::{Transport, TransportError};
use super::{DownloadError, LocalStore, DOWNLOAD_ALBUM};

impl From<TransportError> for DownloadError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => DownloadError::Network(msg),
            TransportError::Status(code) => {
                DownloadError::TransferFailed(format!("transfer status {}", code))
            }
        }
    }
}

/// Saves a remote image to local storage and registers it in the gallery.
#[derive(Debug, Clone)]
pub struct DownloadManager<T: Transport, P: Platform> {
    transport: T,
    platform: P,
    store: LocalStore,
}

impl<T: Transport, P: Platform> DownloadManager<T, P> {
    pub fn new(transport: T, platform: P, store: LocalStore) -> Self {
        Self {
            transport,
            platform,
            store,
        }
    }

    /// Download `uri` into the fixed local file and add it to the
    /// "Download" album.
    ///
    /// Three failure points, in order: permission denial (nothing is
    /// transferred), the byte transfer itself, and the gallery
    /// registration. Permission is re-requested on every call. Returns the
    /// local path on success.
    pub async fn download(&self, uri: &str) -> Result<PathBuf, DownloadError> {
        if !self.platform.request_gallery_permission().await {
            tracing::warn!("gallery permission denied, download aborted");
            return Err(DownloadError::PermissionDenied);
        }

        let bytes = self.transport.fetch_bytes(uri).await?;

        let path = self.store.download_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::TransferFailed(e.to_string()))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| DownloadError::TransferFailed(e.to_string()))?;

        self.platform
            .save_to_album(DOWNLOAD_ALBUM, &path)
            .await
            .map_err(|e| DownloadError::TransferFailed(e.to_string()))?;

        tracing::info!(%uri, path = %path.display(), "download complete");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_mapping() {
        let network: DownloadError = TransportError::Network("refused".to_string()).into();
        assert!(matches!(network, DownloadError::Network(_)));

        let status: DownloadError = TransportError::Status(500).into();
        match status {
            DownloadError::TransferFailed(msg) => assert!(msg.contains("500")),
            other => panic!("expected TransferFailed, got {:?}", other),
        }
    }
}
