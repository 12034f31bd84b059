// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Full-screen detail view state machine.
//!
//! Created when an item is opened, dropped on dismiss. The image-load
//! concern is a two-state machine (`Loading -> Loaded`, terminal); the
//! download concern tracks its own lifecycle and arms a transient
//! confirmation banner on success that hides itself after a fixed duration
//! with no user action.

use tokio::time::{Duration, Instant};

use crate::grid::{aspect_fit, DETAIL_WIDTH_FRACTION};
use crate::transfer::{DownloadError, DownloadManager, Platform, ShareError, ShareManager, Transport};
use crate::types::MediaItem;

/// How long the saved-confirmation banner stays visible.
pub const BANNER_DURATION: Duration = Duration::from_millis(3000);

/// Image decode lifecycle. `Loaded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Loading,
    Loaded,
}

/// Download lifecycle within the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadState {
    Idle,
    Downloading,
    Success,
    Failure(String),
}

/// State of the detail screen for one selected item.
#[derive(Debug, Clone)]
pub struct DetailState {
    item: MediaItem,
    box_width: f32,
    box_height: f32,
    image_state: ImageState,
    download_state: DownloadState,
    /// The confirmation banner is visible until this instant.
    banner_deadline: Option<Instant>,
}

impl DetailState {
    /// Open the detail view for an item.
    ///
    /// The box is aspect-fit against the detail fraction of the viewport
    /// width, so the larger dimension never exceeds that fraction; unknown
    /// intrinsic dimensions yield a square box.
    pub fn open(item: MediaItem, viewport_width: f32) -> Self {
        let max = viewport_width * DETAIL_WIDTH_FRACTION;
        let (box_width, box_height) = aspect_fit(item.width, item.height, max);
        Self {
            item,
            box_width,
            box_height,
            image_state: ImageState::Loading,
            download_state: DownloadState::Idle,
            banner_deadline: None,
        }
    }

    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    pub fn box_height(&self) -> f32 {
        self.box_height
    }

    pub fn image_state(&self) -> ImageState {
        self.image_state
    }

    pub fn download_state(&self) -> &DownloadState {
        &self.download_state
    }

    /// The displayed image signalled decode completion. Idempotent.
    pub fn image_loaded(&mut self) {
        self.image_state = ImageState::Loaded;
    }

    /// Save the item through the download manager.
    ///
    /// Success arms the confirmation banner; failure is recorded and also
    /// returned so the host can raise its blocking alert. Retrying is
    /// user-initiated only.
    pub async fn download<T: Transport, P: Platform>(
        &mut self,
        manager: &DownloadManager<T, P>,
    ) -> Result<(), DownloadError> {
        self.download_state = DownloadState::Downloading;
        match manager.download(&self.item.uri).await {
            Ok(_) => {
                self.download_state = DownloadState::Success;
                self.banner_deadline = Some(Instant::now() + BANNER_DURATION);
                Ok(())
            }
            Err(err) => {
                self.download_state = DownloadState::Failure(err.to_string());
                Err(err)
            }
        }
    }

    /// Share the item through the share manager. Share state lives with the
    /// platform's own UI; only errors come back to the host.
    pub async fn share<T: Transport, P: Platform>(
        &self,
        manager: &ShareManager<T, P>,
    ) -> Result<(), ShareError> {
        manager.share(&self.item.uri).await
    }

    /// Whether the saved-confirmation banner is currently visible. Turns
    /// false on its own once the banner duration elapses.
    pub fn banner_visible(&self) -> bool {
        self.banner_deadline
            .map_or(false, |deadline| Instant::now() < deadline)
    }

    /// Return to the browsing screen. Unconditional; valid in every state.
    pub fn dismiss(self) {}
}
