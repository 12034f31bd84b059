// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! pixelbrowse - Remote image catalog browsing engine
//!
//! Browse a category-keyed remote image catalog: fetch and normalize item
//! lists, filter categories by search, lay items out in an adaptive
//! two-column masonry grid, and open a detail view that can save an item to
//! local storage or hand it to the platform share surface.
//!
//! # Core Modules
//!
//! - [`config`] - Injected, immutable catalog configuration
//! - [`types`] - Canonical data types (`MediaItem`, `LoadState`)
//! - [`catalog`] - Remote index fetch and record normalization
//! - [`browse`] - Category selection, search filtering, stale-fetch guard
//! - [`grid`] - Masonry layout with incremental slot realization
//! - [`detail`] - Detail-view state machine (load, download, share, banner)
//! - [`transfer`] - Byte transfers to local storage and platform surfaces

pub mod browse;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod grid;
pub mod transfer;
pub mod types;

// Re-export commonly used types
pub use browse::{BrowseState, FetchToken, SelectOutcome};
pub use catalog::{CatalogClient, CatalogError};
pub use config::CatalogConfig;
pub use detail::{DetailState, DownloadState, ImageState, BANNER_DURATION};
pub use grid::{
    aspect_fit, GridLayout, GridView, Slot, COLUMN_COUNT, DETAIL_WIDTH_FRACTION,
    GRID_WIDTH_FRACTION, PLACEHOLDER_COUNT,
};
pub use transfer::{
    CliPlatform, DownloadError, DownloadManager, HttpTransport, LocalStore, Platform, ShareError,
    ShareManager, Transport, TransportError,
};
pub use types::{LoadState, MediaItem};
