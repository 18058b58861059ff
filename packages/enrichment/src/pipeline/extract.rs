//! Extraction invoker: prompt the model, retry on transient failure,
//! hand the raw text to the parser.

use crate::error::Result;
use crate::parse::{parse_fields, ParsedFields};
use crate::retry::with_retries;
use crate::traits::chat::ChatModel;
use crate::types::config::EnrichmentConfig;

/// Call the model through the retry policy and parse its response.
///
/// Returns whatever fields the cascade recovers plus the raw response
/// text for diagnostics. An `Err` here means the API gave up after the
/// configured attempts (or failed non-transiently); the orchestrator
/// converts that into a degraded record, never an aborted one.
pub async fn extract<M: ChatModel + ?Sized>(
    model: &M,
    config: &EnrichmentConfig,
    system: &str,
    user: &str,
    expected_fields: &[&str],
) -> Result<(ParsedFields, String)> {
    let raw = with_retries(config.max_retries, config.base_backoff, |attempt| {
        tracing::debug!(attempt = attempt + 1, "calling chat model");
        model.complete(system, user)
    })
    .await?;

    let fields = parse_fields(&raw, expected_fields);
    Ok((fields, raw))
}
