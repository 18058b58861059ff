//! Enrichment pipeline: orchestrators, batch driver, prompts.

pub mod batch;
pub mod contact;
pub mod extract;
pub mod prompts;
pub mod revenue;
pub mod validate;

use std::time::Duration;

use crate::traits::searcher::{SearchOutcome, WebSearcher};
use crate::types::config::EnrichmentConfig;

pub use batch::{run_batch, BatchRun, BatchSummary, Enricher};
pub use contact::ContactEnricher;
pub use revenue::RevenueEnricher;

/// Search with the configured result count, then hold the fixed cooldown.
///
/// The cooldown applies after every call, success or failure. It is
/// backpressure toward the provider, not part of the call's contract.
pub(crate) async fn cooled_search<S: WebSearcher>(
    searcher: &S,
    config: &EnrichmentConfig,
    query: &str,
) -> SearchOutcome {
    let outcome = searcher.search(query, config.search_count).await;
    if config.search_cooldown > Duration::ZERO {
        tokio::time::sleep(config.search_cooldown).await;
    }
    outcome
}

/// Collapse the model's `NOT_FOUND` sentinel (and empties) to `None`.
pub(crate) fn not_found_filter(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("NOT_FOUND") && !v.eq_ignore_ascii_case("ERROR")
    })
}
