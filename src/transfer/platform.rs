// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Host platform surfaces consumed by the transfer flows.
//!
//! The engine never talks to a permission prompt, gallery, or share sheet
//! directly; the hosting screen supplies an implementation of [`Platform`].
//! [`CliPlatform`] is the terminal host used by the pixelbrowse binary.

use std::io;
use std::path::{Path, PathBuf};

/// Platform surfaces: permission prompt, gallery/album write, share sheet.
#[allow(async_fn_in_trait)]
pub trait Platform {
    /// Ask the user for gallery-write permission. Called on every download;
    /// a previous grant is never cached across calls.
    async fn request_gallery_permission(&self) -> bool;

    /// Register `file` as a gallery asset inside `album`.
    async fn save_to_album(&self, album: &str, file: &Path) -> io::Result<()>;

    /// Whether a share surface exists on this platform.
    fn share_available(&self) -> bool;

    /// Present the platform share surface for `file`.
    async fn present_share(&self, file: &Path) -> io::Result<()>;
}

/// Terminal host platform.
///
/// Permission is granted implicitly (the user invoked the command), the
/// "gallery album" is a subdirectory of the pictures directory, and sharing
/// reveals the local file path for the user to hand off.
#[derive(Debug, Clone)]
pub struct CliPlatform {
    pictures_dir: PathBuf,
}

impl CliPlatform {
    pub fn new() -> Self {
        let pictures_dir = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { pictures_dir }
    }

    /// Host with an explicit pictures directory.
    pub fn with_pictures_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            pictures_dir: dir.into(),
        }
    }
}

impl Default for CliPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for CliPlatform {
    async fn request_gallery_permission(&self) -> bool {
        // Running the command is the grant on a terminal host.
        tracing::debug!("gallery permission granted by invocation");
        true
    }

    async fn save_to_album(&self, album: &str, file: &Path) -> io::Result<()> {
        let album_dir = self.pictures_dir.join(album);
        tokio::fs::create_dir_all(&album_dir).await?;
        let file_name = file
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no file name"))?;
        let target = album_dir.join(file_name);
        tokio::fs::copy(file, &target).await?;
        tracing::info!(target = %target.display(), "saved to album");
        Ok(())
    }

    fn share_available(&self) -> bool {
        true
    }

    async fn present_share(&self, file: &Path) -> io::Result<()> {
        // No share sheet on a terminal; reveal the prepared file instead.
        println!("Ready to share: {}", file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cli_platform_always_grants_permission() {
        let platform = CliPlatform::new();
        assert!(platform.request_gallery_permission().await);
        assert!(platform.share_available());
    }

    #[tokio::test]
    async fn test_save_to_album_copies_into_album_dir() {
        let pictures = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let source = staging.path().join("downloaded_image.jpg");
        tokio::fs::write(&source, b"jpeg-bytes").await.unwrap();

        let platform = CliPlatform::with_pictures_dir(pictures.path());
        platform.save_to_album("Download", &source).await.unwrap();

        let target = pictures.path().join("Download").join("downloaded_image.jpg");
        assert_eq!(tokio::fs::read(&target).await.unwrap(), b"jpeg-bytes");
    }
}
