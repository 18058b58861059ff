//! Company revenue orchestrator.
//!
//! Per-record flow: validate → search financials → extract a revenue
//! figure → tier lookup. The tier derivation is a static threshold table
//! and runs regardless of how the AI steps went.

use async_trait::async_trait;

use crate::error::{EnrichError, Result};
use crate::parse::ParseOutcome;
use crate::pipeline::batch::Enricher;
use crate::pipeline::cooled_search;
use crate::pipeline::extract::extract;
use crate::pipeline::prompts::{self, REVENUE_SYSTEM_PROMPT};
use crate::pipeline::validate::{normalize_domain_hint, sanitize_identity};
use crate::search::queries;
use crate::tier::{format_revenue, Tier};
use crate::traits::chat::ChatModel;
use crate::traits::searcher::{SearchOutcome, WebSearcher};
use crate::types::config::EnrichmentConfig;
use crate::types::record::CompanyRecord;
use crate::types::report::{CompanyReport, EnrichmentStatus};

const REVENUE_FIELDS: &[&str] = &["revenue_usd", "source_url", "confidence", "reasoning"];

/// Enriches one company record at a time.
pub struct RevenueEnricher<'a, S, M> {
    searcher: &'a S,
    model: &'a M,
    config: &'a EnrichmentConfig,
}

impl<'a, S: WebSearcher, M: ChatModel> RevenueEnricher<'a, S, M> {
    pub fn new(searcher: &'a S, model: &'a M, config: &'a EnrichmentConfig) -> Self {
        Self {
            searcher,
            model,
            config,
        }
    }

    async fn run(&self, record: &CompanyRecord) -> CompanyReport {
        // Validating
        let company_name = match sanitize_identity("company name", &record.company_name) {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(company = %record.company_name, error = %err, "record failed validation");
                return failed_report(record, err.to_string());
            }
        };
        let domain_hint = normalize_domain_hint(&record.company_domain);

        tracing::info!(company = %company_name, "starting revenue analysis");

        // Searching: a failure is captured as context text and the
        // pipeline continues with best effort.
        let outcome = self
            .search_financials(&company_name, domain_hint.as_deref())
            .await;

        let search_failed = outcome.is_failed();
        let mut degraded = search_failed;
        let search_context = match outcome.error() {
            Some(kind) => {
                tracing::warn!(company = %company_name, %kind, "financials search failed, continuing with empty context");
                format!("Search failed: {kind}")
            }
            None if outcome.hits().is_empty() => {
                format!("No financial information found for {company_name}.")
            }
            None => prompts::format_hits(outcome.hits(), 5),
        };

        // Extracting
        let user = prompts::revenue_user_prompt(&company_name, &search_context);
        let (revenue, citation) = match extract(
            self.model,
            self.config,
            REVENUE_SYSTEM_PROMPT,
            &user,
            REVENUE_FIELDS,
        )
        .await
        {
            Ok((fields, _raw)) => {
                if fields.outcome == ParseOutcome::Unparsed {
                    degraded = true;
                    let citation = fields
                        .citation
                        .clone()
                        .unwrap_or_else(|| "Could not parse structured response".to_string());
                    (None, citation)
                } else {
                    let revenue = fields.number("revenue_usd").filter(|&r| {
                        if r < 0.0 {
                            tracing::warn!(company = %company_name, revenue = r, "negative revenue value discarded");
                        }
                        r >= 0.0
                    });
                    let source = fields.string("source_url").unwrap_or_default();
                    let confidence = fields.string("confidence").unwrap_or_else(|| "low".to_string());
                    let reasoning = fields.string("reasoning").unwrap_or_default();
                    (
                        revenue,
                        format!("{source} (Confidence: {confidence}) - {reasoning}"),
                    )
                }
            }
            Err(err) => {
                tracing::error!(company = %company_name, error = %err, "revenue extraction failed");
                degraded = true;
                (None, format!("Revenue extraction failed: {err}"))
            }
        };

        // Deriving: static tier lookup, independent of any AI call.
        let tier = Tier::from_revenue(revenue);

        let status = match (revenue.is_some(), degraded, search_failed) {
            (true, false, _) => EnrichmentStatus::Success,
            (true, true, _) => EnrichmentStatus::Partial,
            // Nothing derived and the pipeline never got past search.
            (false, _, true) => EnrichmentStatus::Failed,
            (false, _, false) => EnrichmentStatus::Partial,
        };

        tracing::info!(
            company = %company_name,
            tier = tier.label(),
            status = status.as_str(),
            "revenue analysis completed"
        );

        CompanyReport {
            company_name,
            company_region: record.company_region.trim().to_string(),
            company_domain: domain_hint.unwrap_or_default(),
            estimated_revenue_usd: revenue,
            revenue_display: format_revenue(revenue),
            tier,
            tier_description: tier.description().to_string(),
            status,
            citation,
        }
    }

    /// Financial search in two tiers: professional data sites first, in
    /// order, stopping at the first site with results; the generic
    /// revenue query only when none of them has anything. A failing site
    /// is skipped, so only the final generic search can fail the step.
    async fn search_financials(&self, company_name: &str, domain: Option<&str>) -> SearchOutcome {
        for site in queries::PROFESSIONAL_DATA_SITES {
            let outcome = cooled_search(
                self.searcher,
                self.config,
                &queries::professional_site(site, company_name, domain),
            )
            .await;

            match outcome {
                SearchOutcome::Hits(hits) if !hits.is_empty() => {
                    tracing::info!(site, hits = hits.len(), "professional data site has results");
                    return SearchOutcome::Hits(hits);
                }
                SearchOutcome::Failed(kind) => {
                    tracing::warn!(site, %kind, "professional site search failed, trying next");
                }
                SearchOutcome::Hits(_) => {}
            }
        }

        tracing::info!(company = %company_name, "no professional site results, using generic search");
        cooled_search(
            self.searcher,
            self.config,
            &queries::company_financials(company_name, domain),
        )
        .await
    }
}

fn failed_report(record: &CompanyRecord, citation: String) -> CompanyReport {
    CompanyReport {
        company_name: record.company_name.trim().to_string(),
        company_region: record.company_region.trim().to_string(),
        company_domain: record.company_domain.trim().to_string(),
        estimated_revenue_usd: None,
        revenue_display: format_revenue(None),
        tier: Tier::Unknown,
        tier_description: Tier::Unknown.description().to_string(),
        status: EnrichmentStatus::Failed,
        citation,
    }
}

#[async_trait]
impl<S: WebSearcher, M: ChatModel> Enricher for RevenueEnricher<'_, S, M> {
    type Record = CompanyRecord;
    type Report = CompanyReport;

    async fn enrich(&self, record: &CompanyRecord) -> Result<CompanyReport> {
        Ok(self.run(record).await)
    }

    fn failure_report(&self, record: &CompanyRecord, error: &EnrichError) -> CompanyReport {
        failed_report(record, format!("Processing failed: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::testing::MockChatModel;
    use crate::traits::searcher::{MockSearcher, SearchHit};

    const REVENUE_RESPONSE: &str = r#"{"revenue_usd": 750000000, "source_url": "https://rocketreach.co/acme", "confidence": "high", "reasoning": "listed"}"#;

    fn data_site_hit() -> SearchHit {
        SearchHit::new(
            "Acme Corp revenue",
            "https://rocketreach.co/acme",
            "$750M annual revenue",
        )
    }

    #[tokio::test]
    async fn professional_site_results_skip_the_generic_search() {
        let config = EnrichmentConfig::default().without_delays();
        let searcher = MockSearcher::new().with_hits(
            &queries::professional_site("rocketreach.co", "Acme Corp", None),
            vec![data_site_hit()],
        );
        let model = MockChatModel::new().with_response(REVENUE_RESPONSE);
        let enricher = RevenueEnricher::new(&searcher, &model, &config);

        let report = enricher.run(&CompanyRecord::new("Acme Corp")).await;

        // The first site answered, so no further search was made.
        assert_eq!(searcher.calls(), 1);
        assert_eq!(report.estimated_revenue_usd, Some(750_000_000.0));
        assert_eq!(report.status, EnrichmentStatus::Success);
    }

    #[tokio::test]
    async fn empty_professional_sites_fall_back_to_generic_search() {
        let config = EnrichmentConfig::default().without_delays();
        let searcher = MockSearcher::new().with_hits(
            &queries::company_financials("Acme Corp", None),
            vec![data_site_hit()],
        );
        let model = MockChatModel::new().with_response(REVENUE_RESPONSE);
        let enricher = RevenueEnricher::new(&searcher, &model, &config);

        let report = enricher.run(&CompanyRecord::new("Acme Corp")).await;

        // Every site was tried before the generic query.
        assert_eq!(searcher.calls(), queries::PROFESSIONAL_DATA_SITES.len() + 1);
        assert_eq!(report.status, EnrichmentStatus::Success);
    }

    #[tokio::test]
    async fn failing_professional_site_is_skipped_not_fatal() {
        let config = EnrichmentConfig::default().without_delays();
        let searcher = MockSearcher::new()
            .with_failure(
                &queries::professional_site("rocketreach.co", "Acme Corp", None),
                ApiErrorKind::ServerError,
            )
            .with_hits(
                &queries::professional_site("apollo.io", "Acme Corp", None),
                vec![data_site_hit()],
            );
        let model = MockChatModel::new().with_response(REVENUE_RESPONSE);
        let enricher = RevenueEnricher::new(&searcher, &model, &config);

        let report = enricher.run(&CompanyRecord::new("Acme Corp")).await;

        assert_eq!(searcher.calls(), 2);
        assert_eq!(report.status, EnrichmentStatus::Success);
    }
}
