// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Remote catalog access.
//!
//! Fetches a category's item list from the remote index endpoint and
//! normalizes the raw records into strongly-typed [`MediaItem`]s at this
//! boundary. Malformed records are skipped, never propagated downstream.
//!
//! # Example
//!
//! ```no_run
//! use pixelbrowse::catalog::CatalogClient;
//!
//! # async fn run() -> Result<(), pixelbrowse::catalog::CatalogError> {
//! let client = CatalogClient::new("https://res.cloudinary.com/dfxayonyy/image");
//! let items = client.fetch("Nature").await?;
//! for item in items {
//!     println!("{}", item.uri);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::types::MediaItem;

/// Default timeout for index requests (in seconds).
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Default timeout for establishing a connection (in seconds).
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Error types specific to catalog operations.
#[derive(Debug, Clone)]
pub enum CatalogError {
    /// Transport-level failure (DNS, connection, timeout).
    Network(String),
    /// The endpoint answered with a non-2xx status.
    Status(u16),
    /// The response body was not the expected index shape.
    Decode(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Catalog endpoint returned status {}", code),
            Self::Decode(msg) => write!(f, "Invalid catalog response: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Raw index payload: a collection of resource records.
#[derive(Debug, Deserialize)]
struct IndexResponse {
    #[serde(default)]
    resources: Vec<IndexRecord>,
}

/// One raw record from the index. Fields are optional so a single malformed
/// record cannot fail the whole response; normalization skips incomplete ones.
#[derive(Debug, Deserialize)]
struct IndexRecord {
    public_id: Option<String>,
    format: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Client for the remote catalog index.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// Base URL of the catalog host.
    host: String,
    /// HTTP client with configured timeouts.
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client for the given catalog host.
    ///
    /// The host is used verbatim when building index URLs, minus any
    /// trailing slash.
    pub fn new(host: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            host: host.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The index URL for a category. The category string is used verbatim;
    /// the remote index is keyed by the exact, case-sensitive label.
    pub fn index_url(&self, category: &str) -> String {
        format!("{}/list/{}.json", self.host, category)
    }

    /// Fetch and normalize the item list for a category.
    ///
    /// Issues exactly one request. On any transport failure or non-2xx
    /// status the caller is expected to surface the error inline and wait
    /// for user-initiated resubmission; nothing is retried here.
    pub async fn fetch(&self, category: &str) -> Result<Vec<MediaItem>, CatalogError> {
        let url = self.index_url(category);
        tracing::debug!(%url, "fetching catalog index");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let index: IndexResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        let items = normalize(&self.host, index);
        tracing::info!(category, count = items.len(), "catalog fetch complete");
        Ok(items)
    }
}

/// Map raw index records into [`MediaItem`]s.
///
/// Display URLs are built deterministically from the record's identifier and
/// format: `{host}/upload/{public_id}.{format}`. Records missing either field
/// are skipped with a warning.
fn normalize(host: &str, index: IndexResponse) -> Vec<MediaItem> {
    index
        .resources
        .into_iter()
        .filter_map(|record| match (record.public_id, record.format) {
            (Some(public_id), Some(format)) => Some(MediaItem {
                uri: format!("{}/upload/{}.{}", host, public_id, format),
                width: record.width,
                height: record.height,
            }),
            (public_id, _) => {
                tracing::warn!(?public_id, "skipping malformed catalog record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "https://res.cloudinary.com/dfxayonyy/image";

    fn parse(json: &str) -> IndexResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_index_url_is_verbatim_and_case_sensitive() {
        let client = CatalogClient::new(HOST);
        assert_eq!(
            client.index_url("Nature"),
            "https://res.cloudinary.com/dfxayonyy/image/list/Nature.json"
        );
        assert_ne!(client.index_url("Nature"), client.index_url("nature"));
    }

    #[test]
    fn test_trailing_slash_stripped_from_host() {
        let client = CatalogClient::new(format!("{}/", HOST));
        assert_eq!(
            client.index_url("Wallpaper"),
            "https://res.cloudinary.com/dfxayonyy/image/list/Wallpaper.json"
        );
    }

    #[test]
    fn test_normalize_builds_display_urls() {
        let index = parse(
            r#"{"resources":[
                {"public_id":"abc123","format":"jpg","width":1600,"height":900},
                {"public_id":"def456","format":"png"}
            ]}"#,
        );
        let items = normalize(HOST, index);
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].uri,
            "https://res.cloudinary.com/dfxayonyy/image/upload/abc123.jpg"
        );
        assert_eq!(items[0].width, Some(1600));
        assert_eq!(items[0].height, Some(900));
        assert_eq!(items[1].width, None);
        assert_eq!(items[1].height, None);
    }

    #[test]
    fn test_normalize_skips_malformed_records() {
        let index = parse(
            r#"{"resources":[
                {"public_id":"ok","format":"jpg"},
                {"public_id":"missing-format"},
                {"format":"jpg"},
                {}
            ]}"#,
        );
        let items = normalize(HOST, index);
        assert_eq!(items.len(), 1);
        assert!(items[0].uri.ends_with("/upload/ok.jpg"));
    }

    #[test]
    fn test_normalize_empty_resources() {
        assert!(normalize(HOST, parse(r#"{"resources":[]}"#)).is_empty());
        assert!(normalize(HOST, parse(r#"{}"#)).is_empty());
    }
}
