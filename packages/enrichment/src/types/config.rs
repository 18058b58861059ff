//! Configuration for the enrichment pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EnrichError, Result};

/// Tunables for one enrichment run.
///
/// Constructed once at process start and passed by reference into each
/// component; there is no ambient global state. All values have stated defaults;
/// the CLI may override them from the environment or flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Model identifier sent to the chat-completions endpoint.
    pub model: String,

    /// Sampling temperature. Default: 0.3.
    pub temperature: f32,

    /// Maximum output tokens per extraction attempt. Default: 2000.
    pub max_tokens: u32,

    /// Number of results requested per search. Default: 10.
    pub search_count: usize,

    /// Attempt cap for transient API failures. Default: 3.
    pub max_retries: u32,

    /// Base delay for exponential backoff between retry attempts.
    /// Attempt `n` (zero-based) waits `base_backoff * 2^n`. Default: 1s.
    pub base_backoff: Duration,

    /// Sleep between records in a batch run. Default: 2s.
    pub inter_record_delay: Duration,

    /// Fixed cooldown after every search call, a backpressure measure
    /// against provider rate limits. Default: 1s.
    pub search_cooldown: Duration,

    /// Per-attempt network timeout. Default: 30s.
    pub request_timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            model: "deepseek/deepseek-chat-v3.1:free".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            search_count: 10,
            max_retries: 3,
            base_backoff: Duration::from_secs(1),
            inter_record_delay: Duration::from_secs(2),
            search_cooldown: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl EnrichmentConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ENRICH_*` environment variables where set.
    ///
    /// Recognized: `ENRICH_MODEL`, `ENRICH_TEMPERATURE`, `ENRICH_MAX_TOKENS`,
    /// `ENRICH_SEARCH_COUNT`, `ENRICH_MAX_RETRIES`. An unparsable value is a
    /// configuration error rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(model) = std::env::var("ENRICH_MODEL") {
            config.model = model;
        }
        if let Ok(raw) = std::env::var("ENRICH_TEMPERATURE") {
            config.temperature = raw
                .parse()
                .map_err(|_| EnrichError::Config(format!("ENRICH_TEMPERATURE not a number: {raw}")))?;
        }
        if let Ok(raw) = std::env::var("ENRICH_MAX_TOKENS") {
            config.max_tokens = raw
                .parse()
                .map_err(|_| EnrichError::Config(format!("ENRICH_MAX_TOKENS not a number: {raw}")))?;
        }
        if let Ok(raw) = std::env::var("ENRICH_SEARCH_COUNT") {
            config.search_count = raw
                .parse()
                .map_err(|_| EnrichError::Config(format!("ENRICH_SEARCH_COUNT not a number: {raw}")))?;
        }
        if let Ok(raw) = std::env::var("ENRICH_MAX_RETRIES") {
            config.max_retries = raw
                .parse()
                .map_err(|_| EnrichError::Config(format!("ENRICH_MAX_RETRIES not a number: {raw}")))?;
        }

        Ok(config)
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the search result count.
    pub fn with_search_count(mut self, count: usize) -> Self {
        self.search_count = count;
        self
    }

    /// Set the retry attempt cap.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the inter-record delay.
    pub fn with_inter_record_delay(mut self, delay: Duration) -> Self {
        self.inter_record_delay = delay;
        self
    }

    /// Set the base backoff delay.
    pub fn with_base_backoff(mut self, delay: Duration) -> Self {
        self.base_backoff = delay;
        self
    }

    /// Zero out every sleep in the pipeline. Intended for tests.
    pub fn without_delays(mut self) -> Self {
        self.base_backoff = Duration::ZERO;
        self.inter_record_delay = Duration::ZERO;
        self.search_cooldown = Duration::ZERO;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stated_values() {
        let config = EnrichmentConfig::default();
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.search_count, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_backoff, Duration::from_secs(1));
        assert_eq!(config.inter_record_delay, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
