// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Transfers of remote bytes to local storage and to the platform share
//! surface.
//!
//! Download and share are independent operations writing to distinct fixed
//! paths, so they may run concurrently without colliding. The platform
//! surfaces they touch (permission prompt, gallery album, share sheet) sit
//! behind the [`Platform`] trait; the byte transfer sits behind
//! [`Transport`].

pub mod download;
pub mod platform;
pub mod share;
pub mod transport;

pub use download::DownloadManager;
pub use platform::{CliPlatform, Platform};
pub use share::ShareManager;
pub use transport::{HttpTransport, Transport, TransportError};

use std::path::{Path, PathBuf};

/// Fixed local filename for downloads. Overwritten on each operation.
pub const DOWNLOAD_FILE_NAME: &str = "downloaded_image.jpg";

/// Fixed local filename for shares, distinct from the download file.
pub const SHARE_FILE_NAME: &str = "shared_image.jpg";

/// Gallery album downloads are registered into.
pub const DOWNLOAD_ALBUM: &str = "Download";

/// Error types for the download operation.
#[derive(Debug, Clone)]
pub enum DownloadError {
    /// Gallery-write permission was not granted; nothing was transferred.
    PermissionDenied,
    /// Transport-level failure while fetching the remote bytes.
    Network(String),
    /// The transfer did not complete, or the gallery registration failed.
    TransferFailed(String),
}

impl std::fmt::Display for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => {
                write!(f, "Cannot save the image without permission to access the gallery")
            }
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::TransferFailed(msg) => write!(f, "Unable to download the image: {}", msg),
        }
    }
}

impl std::error::Error for DownloadError {}

/// Error types for the share operation.
#[derive(Debug, Clone)]
pub enum ShareError {
    /// The platform exposes no share surface.
    Unavailable,
    /// Transport-level failure while fetching the remote bytes.
    Network(String),
    /// The transfer or the share invocation did not complete.
    TransferFailed(String),
}

impl std::fmt::Display for ShareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "Sharing is not available on this device"),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::TransferFailed(msg) => {
                write!(f, "Unable to prepare the image for sharing: {}", msg)
            }
        }
    }
}

impl std::error::Error for ShareError {}

/// Fixed-path local storage for transfer targets.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Store rooted at the app's private data directory.
    pub fn new() -> Self {
        let dir = dirs::data_dir()
            .map(|d| d.join("pixelbrowse"))
            .unwrap_or_else(|| PathBuf::from(".pixelbrowse"));
        Self { dir }
    }

    /// Store rooted at an explicit directory (tests, overrides).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fixed target path for downloads.
    pub fn download_path(&self) -> PathBuf {
        self.dir.join(DOWNLOAD_FILE_NAME)
    }

    /// Fixed target path for shares.
    pub fn share_path(&self) -> PathBuf {
        self.dir.join(SHARE_FILE_NAME)
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}
