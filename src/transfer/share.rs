// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Share flow: transfer, availability check, share surface.

use super::platform::Platform;
use super::transport::{Transport, TransportError};
use super::{LocalStore, ShareError};

impl From<TransportError> for ShareError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => ShareError::Network(msg),
            TransportError::Status(code) => {
                ShareError::TransferFailed(format!("transfer status {}", code))
            }
        }
    }
}

/// Prepares a remote image in local storage and hands it to the platform
/// share surface.
#[derive(Debug, Clone)]
pub struct ShareManager<T: Transport, P: Platform> {
    transport: T,
    platform: P,
    store: LocalStore,
}

impl<T: Transport, P: Platform> ShareManager<T, P> {
    pub fn new(transport: T, platform: P, store: LocalStore) -> Self {
        Self {
            transport,
            platform,
            store,
        }
    }

    /// Share `uri` through the platform share surface.
    ///
    /// The bytes land in the fixed share file, independent of the download
    /// file. When no share surface exists the operation fails with
    /// [`ShareError::Unavailable`] and the share surface is never invoked.
    /// No success feedback beyond the platform's own UI.
    pub async fn share(&self, uri: &str) -> Result<(), ShareError> {
        let bytes = self.transport.fetch_bytes(uri).await?;

        let path = self.store.share_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ShareError::TransferFailed(e.to_string()))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| ShareError::TransferFailed(e.to_string()))?;

        if !self.platform.share_available() {
            tracing::warn!("no share surface on this platform");
            return Err(ShareError::Unavailable);
        }

        self.platform
            .present_share(&path)
            .await
            .map_err(|e| ShareError::TransferFailed(e.to_string()))?;

        tracing::info!(%uri, "share presented");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_mapping() {
        let network: ShareError = TransportError::Network("reset".to_string()).into();
        assert!(matches!(network, ShareError::Network(_)));

        let status: ShareError = TransportError::Status(404).into();
        assert!(matches!(status, ShareError::TransferFailed(_)));
    }
}
