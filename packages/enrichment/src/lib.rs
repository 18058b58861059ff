//! Record Enrichment Pipeline
//!
//! Enriches tabular records (contacts or companies) by querying a web
//! search API, feeding the results to a hosted language model for
//! structured extraction, and deriving a final classification: a job
//! title and candidate work email for contacts, a revenue tier for
//! companies.
//!
//! # Design
//!
//! - **Degraded states are data.** Search failures, unparsable model
//!   output and exhausted retries all flow into the per-record report as
//!   status + citation; nothing past input validation aborts a record,
//!   and nothing aborts the batch.
//! - **Sequential on purpose.** One record and one HTTP request at a
//!   time, with explicit sleeps (post-search cooldown, retry backoff,
//!   inter-record delay) to stay polite toward rate-limited providers.
//! - **Traits at the seams.** [`WebSearcher`] and [`ChatModel`] abstract
//!   the two external services; mocks live alongside for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use enrichment::{
//!     BraveSearcher, ContactEnricher, EnrichmentConfig, OpenRouterChat, run_batch,
//! };
//!
//! let config = EnrichmentConfig::from_env()?;
//! let searcher = BraveSearcher::from_env()?;
//! let model = OpenRouterChat::from_env(&config)?;
//!
//! let enricher = ContactEnricher::new(&searcher, &model, &config);
//! let run = run_batch(&enricher, &records, config.inter_record_delay).await;
//! ```

pub mod ai;
pub mod email;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod retry;
pub mod search;
pub mod testing;
pub mod tier;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use ai::OpenRouterChat;
pub use error::{ApiError, ApiErrorKind, EnrichError, Result};
pub use parse::{ParseOutcome, ParsedFields, UNPARSED_CITATION_PREFIX};
pub use pipeline::{
    run_batch, BatchRun, BatchSummary, ContactEnricher, Enricher, RevenueEnricher,
};
pub use search::BraveSearcher;
pub use tier::{format_revenue, Tier};
pub use traits::{ChatModel, MockSearcher, SearchHit, SearchOutcome, WebSearcher};
pub use types::{
    config::EnrichmentConfig,
    record::{CompanyRecord, ContactRecord},
    report::{CompanyReport, ContactReport, Enriched, EnrichmentStatus},
};
