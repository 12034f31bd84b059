// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Runtime configuration for pixelbrowse.
//!
//! The configuration is read once at startup and injected by reference into
//! the engine; it is never mutated afterwards. The category list is ordered,
//! unique, and its first element is the default active category.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Default remote catalog host. Index lives at `{host}/list/{category}.json`,
/// display assets at `{host}/upload/{public_id}.{format}`.
pub const DEFAULT_HOST: &str = "https://res.cloudinary.com/dfxayonyy/image";

/// Default category set, in display order. The first entry is the default
/// active category.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Wallpaper",
    "Nature",
    "Animals",
    "City",
    "Minimal",
    "Abstract",
    "Space",
    "Flowers",
];

/// Immutable catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the remote catalog host.
    pub host: String,
    /// Ordered category labels. Uniqueness required; order is display order.
    pub categories: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CatalogConfig {
    /// Default config file location: `<config_dir>/pixelbrowse/config.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pixelbrowse").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("pixelbrowse-config.json"))
    }

    /// Load the configuration from the given path, or from the default
    /// location when `path` is `None`. A missing file yields the built-in
    /// defaults; a present but malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the invariants the engine relies on: a non-empty host, at
    /// least one category, no empty labels, no duplicates.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("Config host must not be empty");
        }
        if self.categories.is_empty() {
            bail!("Config must list at least one category");
        }
        for (i, category) in self.categories.iter().enumerate() {
            if category.trim().is_empty() {
                bail!("Category at index {} is empty", i);
            }
            if self.categories[..i].contains(category) {
                bail!("Duplicate category: {}", category);
            }
        }
        Ok(())
    }

    /// The default active category (first configured entry).
    pub fn default_category(&self) -> &str {
        // validate() guarantees at least one entry
        &self.categories[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_category(), "Wallpaper");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let config = CatalogConfig::load(Some(&path)).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = CatalogConfig {
            host: "https://example.com/image".to_string(),
            categories: vec!["Wallpaper".to_string(), "Nature".to_string()],
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = CatalogConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_duplicate_categories_rejected() {
        let config = CatalogConfig {
            host: DEFAULT_HOST.to_string(),
            categories: vec!["Nature".to_string(), "Nature".to_string()],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_category_list_rejected() {
        let config = CatalogConfig {
            host: DEFAULT_HOST.to_string(),
            categories: vec![],
        };
        assert!(config.validate().is_err());
    }
}
