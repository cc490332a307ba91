//! Search-as-you-type requests over a loaded symbol index

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::index::{IndexEntry, SymbolIndex};

/// Request for symbols matching a typed prefix
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Text typed into the search box
    pub query: String,
    /// Maximum number of entries to return (0 = unlimited)
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Response for a prefix search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// Matching entries before the limit was applied
    pub total_matches: usize,
    pub results: Vec<SearchHit>,
}

/// One matching entry, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub key: String,
    pub label: String,
    pub targets: Vec<ResolvedTarget>,
}

/// A target with its navigable link
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTarget {
    pub url: String,
    pub scope: String,
    pub open_in_parent: bool,
}

impl From<&IndexEntry> for SearchHit {
    fn from(entry: &IndexEntry) -> Self {
        let targets = entry
            .targets
            .iter()
            .map(|target| ResolvedTarget {
                url: target.url.clone(),
                scope: target.scope.clone(),
                open_in_parent: target.open_in_parent,
            })
            .collect();

        Self {
            key: entry.key.clone(),
            label: entry.label.clone(),
            targets,
        }
    }
}

/// Answers search requests against a shared index
#[derive(Debug, Clone)]
pub struct SymbolSearcher {
    index: Arc<SymbolIndex>,
    default_limit: usize,
}

impl SymbolSearcher {
    pub fn new(index: Arc<SymbolIndex>, default_limit: usize) -> Self {
        Self {
            index,
            default_limit,
        }
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    /// Run a prefix search.
    ///
    /// The limit truncates whole entries; an entry's targets are never split.
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        let limit = request.limit.unwrap_or(self.default_limit);
        let matches = self.index.lookup(&request.query);
        let total_matches = matches.len();

        let take = if limit == 0 { total_matches } else { limit };
        let results: Vec<SearchHit> = matches.into_iter().take(take).map(SearchHit::from).collect();

        debug!(
            "Search '{}' matched {} entries, returning {}",
            request.query,
            total_matches,
            results.len()
        );

        SearchResponse {
            query: request.query.clone(),
            total_matches,
            results,
        }
    }
}
