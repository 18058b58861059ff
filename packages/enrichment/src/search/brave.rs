//! Brave web-search client.
//!
//! One HTTP GET per query against the Brave search API. Every expected
//! failure mode maps onto an [`ApiErrorKind`] inside the returned
//! [`SearchOutcome`]; nothing propagates as an error past this boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ApiErrorKind, EnrichError, Result};
use crate::traits::searcher::{SearchHit, SearchOutcome, WebSearcher};

const BRAVE_SEARCH_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Brave-backed web searcher.
pub struct BraveSearcher {
    client: reqwest::Client,
    api_key: String,
    timeout: Duration,
}

impl BraveSearcher {
    /// Create a new searcher with the given subscription token.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Create from the `BRAVE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BRAVE_API_KEY")
            .map_err(|_| EnrichError::Config("BRAVE_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the per-request timeout (default: 30s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: BraveWeb,
}

#[derive(Deserialize, Default)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Deserialize)]
struct BraveResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    description: String,
    /// Human-readable page age ("2 days ago", "April 4, 2023").
    #[serde(default)]
    age: String,
    /// Machine-readable page timestamp, present on some results.
    #[serde(default)]
    page_age: String,
}

impl BraveResult {
    fn published(&self) -> Option<String> {
        [&self.age, &self.page_age]
            .into_iter()
            .find(|v| !v.trim().is_empty())
            .cloned()
    }
}

#[async_trait]
impl WebSearcher for BraveSearcher {
    async fn search(&self, query: &str, count: usize) -> SearchOutcome {
        if query.trim().is_empty() {
            tracing::error!("rejected empty search query");
            return SearchOutcome::Failed(ApiErrorKind::InvalidQuery);
        }

        tracing::debug!(%query, count, "performing web search");

        let response = self
            .client
            .get(BRAVE_SEARCH_URL)
            .timeout(self.timeout)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[
                ("q", query),
                ("count", &count.to_string()),
                ("offset", "0"),
                ("mkt", "en-US"),
                ("safesearch", "moderate"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                let kind = ApiErrorKind::from_transport(&err);
                tracing::warn!(%kind, error = %err, "search request failed");
                return SearchOutcome::Failed(kind);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let kind = ApiErrorKind::from_status(status.as_u16());
            tracing::warn!(status = status.as_u16(), %kind, "search returned error status");
            return SearchOutcome::Failed(kind);
        }

        let body: BraveResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "failed to decode search response");
                return SearchOutcome::Failed(ApiErrorKind::ServerError);
            }
        };

        let hits: Vec<SearchHit> = body
            .web
            .results
            .into_iter()
            .map(|r| {
                let published = r.published();
                let mut hit = SearchHit::new(r.title, r.url, r.description);
                hit.published = published;
                hit
            })
            .collect();

        tracing::debug!(hits = hits.len(), "search completed");
        SearchOutcome::Hits(hits)
    }
}
