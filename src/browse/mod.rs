// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Browsing state: category selection, search filtering, and the fetch
//! lifecycle.
//!
//! [`BrowseState`] is the single owner of the browsing screen's state. It is
//! purely synchronous; the host performs the actual network call and feeds
//! the result back through [`BrowseState::complete_fetch`] with the token it
//! got from [`BrowseState::begin_fetch`]. The token makes category changes
//! last-request-wins: a completion carrying a superseded token is dropped, so
//! a late response can never overwrite state for the currently active
//! category.

use crate::config::CatalogConfig;
use crate::types::{LoadState, MediaItem};

/// Result of a [`BrowseState::select`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The active category changed; the host must issue a new fetch.
    Selected,
    /// The category was already active; no refetch is needed.
    AlreadyActive,
}

impl SelectOutcome {
    /// Returns true when the host must issue a new fetch.
    pub fn needs_fetch(&self) -> bool {
        matches!(self, SelectOutcome::Selected)
    }
}

/// Monotonic token identifying one fetch request.
///
/// Only the most recently issued token is accepted by
/// [`BrowseState::complete_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// State of the browsing screen. Exactly one active category at all times.
#[derive(Debug, Clone)]
pub struct BrowseState {
    /// Configured category labels, in display order.
    categories: Vec<String>,
    /// The single active category. Never empty after construction.
    active_category: String,
    /// Raw search text as typed.
    search_text: String,
    /// Items of the last completed fetch for the active category.
    items: Vec<MediaItem>,
    /// Fetch lifecycle for the active category.
    load_state: LoadState,
    /// Monotonic fetch sequence; the stale-result guard.
    request_seq: u64,
}

impl BrowseState {
    /// Create the browsing state from the injected configuration.
    ///
    /// The initial active category is the first configured entry.
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            active_category: config.default_category().to_string(),
            search_text: String::new(),
            items: Vec::new(),
            load_state: LoadState::Idle,
            request_seq: 0,
        }
    }

    /// The currently active category.
    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// All configured categories, in display order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Items from the last completed fetch.
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Current fetch lifecycle state.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Raw search text as typed.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Select a category.
    ///
    /// Selecting the already-active category is a no-op, which both prevents
    /// a redundant refetch and makes deselection impossible. Otherwise the
    /// active category changes, the search text is cleared, and the caller
    /// must issue a new fetch.
    pub fn select(&mut self, category: &str) -> SelectOutcome {
        if category == self.active_category {
            return SelectOutcome::AlreadyActive;
        }
        if !self.categories.iter().any(|c| c == category) {
            tracing::warn!(category, "selecting a category outside the configured set");
        }
        self.active_category = category.to_string();
        self.search_text.clear();
        SelectOutcome::Selected
    }

    /// Store the raw search query.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Whether the suggestion list should be shown at all. The list is
    /// hidden while the query is empty.
    pub fn suggestions_visible(&self) -> bool {
        !self.search_text.is_empty()
    }

    /// Categories whose label contains the current query, case-insensitively.
    ///
    /// Preserves the configured category order, not match-position order. An
    /// empty query yields the full list.
    pub fn suggestions(&self) -> Vec<&str> {
        let query = self.search_text.to_lowercase();
        self.categories
            .iter()
            .filter(|c| c.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    /// Accept a suggestion: select the category and clear the query.
    ///
    /// Unlike [`select`](Self::select), the query is cleared even when the
    /// suggestion names the already-active category.
    pub fn choose_suggestion(&mut self, category: &str) -> SelectOutcome {
        let outcome = self.select(category);
        self.search_text.clear();
        outcome
    }

    /// Start a fetch for the active category: moves to `Loading` and returns
    /// the token the completion must present.
    ///
    /// Issuing a new token supersedes all earlier ones; in-flight requests
    /// are not aborted, their results are simply dropped on arrival.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.request_seq += 1;
        self.load_state = LoadState::Loading;
        FetchToken(self.request_seq)
    }

    /// Apply a fetch result.
    ///
    /// Returns `false` (and leaves the state untouched) when the token is
    /// stale, i.e. a newer fetch has been issued since this one started.
    pub fn complete_fetch(
        &mut self,
        token: FetchToken,
        result: Result<Vec<MediaItem>, crate::catalog::CatalogError>,
    ) -> bool {
        if token.0 != self.request_seq {
            tracing::debug!(
                token = token.0,
                current = self.request_seq,
                "dropping stale fetch result"
            );
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                self.load_state = LoadState::Error(err.to_string());
            }
        }
        true
    }
}
