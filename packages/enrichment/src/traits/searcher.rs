//! Web searcher trait.
//!
//! Abstracts over keyword search providers. The method signature is
//! deliberately infallible: every expected failure mode comes back as a
//! [`SearchOutcome::Failed`] value, so callers branch on data rather than
//! on errors. A search that fails never aborts a record on its own; the
//! pipeline proceeds with empty search context.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::ApiErrorKind;

/// One result row from a keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Publication date or age of the page, when the provider reports one.
    pub published: Option<String>,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            published: None,
        }
    }

    /// Attach the provider's publication date or page age.
    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }
}

/// Result of one search call: exactly one of two shapes.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Ordered results, possibly empty.
    Hits(Vec<SearchHit>),
    /// Classified failure; carries no results.
    Failed(ApiErrorKind),
}

impl SearchOutcome {
    /// The result rows, empty on failure.
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Hits(hits) => hits,
            SearchOutcome::Failed(_) => &[],
        }
    }

    /// The failure class, if this outcome is a failure.
    pub fn error(&self) -> Option<ApiErrorKind> {
        match self {
            SearchOutcome::Hits(_) => None,
            SearchOutcome::Failed(kind) => Some(*kind),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }
}

/// Keyword web search for enrichment context.
///
/// # Implementations
///
/// - [`crate::search::BraveSearcher`]: Brave web-search API
/// - [`MockSearcher`]: for testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning at most `count` results.
    ///
    /// An empty/whitespace query must come back as
    /// `Failed(ApiErrorKind::InvalidQuery)` without any request being made.
    async fn search(&self, query: &str, count: usize) -> SearchOutcome;
}

/// Mock searcher for testing.
///
/// Returns canned outcomes per query; unknown queries get an empty hit
/// list. Counts calls so tests can assert that no search was attempted.
#[derive(Default)]
pub struct MockSearcher {
    outcomes: RwLock<HashMap<String, SearchOutcome>>,
    calls: AtomicUsize,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an outcome for a query.
    pub fn with_outcome(self, query: &str, outcome: SearchOutcome) -> Self {
        self.outcomes
            .write()
            .unwrap()
            .insert(query.to_string(), outcome);
        self
    }

    /// Add hit rows for a query.
    pub fn with_hits(self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.with_outcome(query, SearchOutcome::Hits(hits))
    }

    /// Add a failure for a query.
    pub fn with_failure(self, query: &str, kind: ApiErrorKind) -> Self {
        self.with_outcome(query, SearchOutcome::Failed(kind))
    }

    /// How many search calls were made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str, _count: usize) -> SearchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if query.trim().is_empty() {
            return SearchOutcome::Failed(ApiErrorKind::InvalidQuery);
        }
        self.outcomes
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or(SearchOutcome::Hits(vec![]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_canned_hits() {
        let searcher = MockSearcher::new().with_hits(
            "acme revenue",
            vec![SearchHit::new("Acme", "https://acme.com", "revenue $2B")],
        );

        let outcome = searcher.search("acme revenue", 10).await;
        assert_eq!(outcome.hits().len(), 1);
        assert_eq!(outcome.hits()[0].url, "https://acme.com");
        assert_eq!(searcher.calls(), 1);
    }

    #[tokio::test]
    async fn empty_query_fails_without_results() {
        let searcher = MockSearcher::new();
        let outcome = searcher.search("   ", 10).await;
        assert_eq!(outcome.error(), Some(ApiErrorKind::InvalidQuery));
        assert!(outcome.hits().is_empty());
    }

    #[tokio::test]
    async fn failure_outcome_carries_kind() {
        let searcher =
            MockSearcher::new().with_failure("down", ApiErrorKind::ServerError);
        let outcome = searcher.search("down", 10).await;
        assert!(outcome.is_failed());
        assert_eq!(outcome.error(), Some(ApiErrorKind::ServerError));
    }
}
