// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Canonical types used across pixelbrowse.
//!
//! This module provides unified type definitions to avoid duplication.

use serde::{Deserialize, Serialize};

/// A single displayable catalog entry.
///
/// Built only by the catalog module from validated remote records. Intrinsic
/// dimensions are absent when the index endpoint does not report them; the
/// layout falls back to a square box in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Display URL for the full image.
    pub uri: String,
    /// Intrinsic pixel width, when the index reports it.
    pub width: Option<u32>,
    /// Intrinsic pixel height, when the index reports it.
    pub height: Option<u32>,
}

impl MediaItem {
    /// Create an item with unknown intrinsic dimensions.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
        }
    }

    /// Create an item with known intrinsic dimensions.
    pub fn with_dimensions(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Intrinsic aspect ratio (width / height), when both dimensions are
    /// known and the height is non-zero.
    pub fn aspect_ratio(&self) -> Option<f32> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if h > 0 => Some(w as f32 / h as f32),
            _ => None,
        }
    }
}

/// Load lifecycle of a catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No fetch has been issued yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch completed successfully.
    Loaded,
    /// The last fetch failed; the message is shown inline.
    Error(String),
}

impl LoadState {
    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Returns true if the last fetch failed.
    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }
}
