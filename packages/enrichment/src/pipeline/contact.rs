//! Contact enrichment orchestrator.
//!
//! Per-record flow: validate → search (LinkedIn + background) → extract
//! job title and profile URL → derive a candidate work email → assemble
//! the report. Any step past validation degrades instead of failing, so
//! every record yields exactly one report.

use async_trait::async_trait;

use crate::email::{candidate_email, detect_domain};
use crate::error::{EnrichError, Result};
use crate::parse::ParseOutcome;
use crate::pipeline::batch::Enricher;
use crate::pipeline::extract::extract;
use crate::pipeline::prompts::{self, CONTACT_SYSTEM_PROMPT};
use crate::pipeline::validate::sanitize_identity;
use crate::pipeline::{cooled_search, not_found_filter};
use crate::search::queries;
use crate::traits::chat::ChatModel;
use crate::traits::searcher::WebSearcher;
use crate::types::config::EnrichmentConfig;
use crate::types::record::ContactRecord;
use crate::types::report::{ContactReport, EnrichmentStatus};

const CONTACT_FIELDS: &[&str] = &["linkedin_url", "current_job_title"];

/// Enriches one contact record at a time.
pub struct ContactEnricher<'a, S, M> {
    searcher: &'a S,
    model: &'a M,
    config: &'a EnrichmentConfig,
}

impl<'a, S: WebSearcher, M: ChatModel> ContactEnricher<'a, S, M> {
    pub fn new(searcher: &'a S, model: &'a M, config: &'a EnrichmentConfig) -> Self {
        Self {
            searcher,
            model,
            config,
        }
    }

    async fn run(&self, record: &ContactRecord) -> ContactReport {
        // Validating: a bad identity field skips search and extraction
        // entirely for this record.
        let contact_name = match sanitize_identity("contact name", &record.contact_name) {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(contact = %record.contact_name, error = %err, "record failed validation");
                return failed_report(record, err.to_string());
            }
        };
        let company_name = record.company_name.trim().to_string();

        tracing::info!(contact = %contact_name, company = %company_name, "starting contact enrichment");

        // Searching: two queries, results combined. Both failing is a
        // degradation, not an abort: extraction proceeds with a
        // placeholder context.
        let profile = cooled_search(
            self.searcher,
            self.config,
            &queries::linkedin_profile(&contact_name, &company_name),
        )
        .await;
        let background = cooled_search(
            self.searcher,
            self.config,
            &queries::contact_background(&contact_name, &company_name),
        )
        .await;

        let mut hits = profile.hits().to_vec();
        hits.extend_from_slice(background.hits());

        let search_failed = profile.is_failed() && background.is_failed();
        let mut degraded = search_failed;
        let search_context = match profile.error() {
            Some(kind) if search_failed => {
                tracing::warn!(%kind, "all contact searches failed, continuing with empty context");
                format!("Search failed: {kind}")
            }
            _ => prompts::format_hits(&hits, self.config.search_count),
        };

        // Extracting
        let user = prompts::contact_user_prompt(&contact_name, &company_name, &search_context);
        let mut failure_citation: Option<String> = None;
        let (linkedin_url, current_job_title) = match extract(
            self.model,
            self.config,
            CONTACT_SYSTEM_PROMPT,
            &user,
            CONTACT_FIELDS,
        )
        .await
        {
            Ok((fields, _raw)) => {
                if fields.outcome == ParseOutcome::Unparsed {
                    degraded = true;
                    failure_citation = fields.citation.clone();
                }
                (
                    not_found_filter(fields.string("linkedin_url")),
                    not_found_filter(fields.string("current_job_title")),
                )
            }
            Err(err) => {
                tracing::error!(contact = %contact_name, error = %err, "contact extraction failed");
                degraded = true;
                failure_citation = Some(format!("Extraction failed: {err}"));
                (None, None)
            }
        };

        // Deriving: detect the company's email domain and build a
        // candidate address. An undetected domain degrades the record.
        let domain = self.detect_company_domain(&company_name).await;
        let work_email = domain
            .as_deref()
            .and_then(|d| candidate_email(&contact_name, d));
        if work_email.is_none() {
            degraded = true;
        }

        let citation = failure_citation.unwrap_or_else(|| {
            if linkedin_url.is_some() {
                "LinkedIn profile".to_string()
            } else {
                "Web search".to_string()
            }
        });

        let status = if current_job_title.is_none() && work_email.is_none() && linkedin_url.is_none()
        {
            EnrichmentStatus::Failed
        } else if current_job_title.is_some() && work_email.is_some() && !degraded {
            EnrichmentStatus::Success
        } else {
            EnrichmentStatus::Partial
        };

        tracing::info!(contact = %contact_name, status = status.as_str(), "contact enrichment completed");

        ContactReport {
            contact_name,
            company_name,
            linkedin_url,
            current_job_title,
            work_email,
            status,
            citation,
        }
    }

    /// Find the company's website domain via an official-site search.
    async fn detect_company_domain(&self, company_name: &str) -> Option<String> {
        if company_name.is_empty() {
            return None;
        }

        let outcome = cooled_search(
            self.searcher,
            self.config,
            &queries::official_website(company_name),
        )
        .await;

        if let Some(kind) = outcome.error() {
            tracing::warn!(company = %company_name, %kind, "domain detection search failed");
            return None;
        }

        let domain = detect_domain(outcome.hits());
        if domain.is_none() {
            tracing::warn!(company = %company_name, "could not detect company domain");
        }
        domain
    }
}

fn failed_report(record: &ContactRecord, citation: String) -> ContactReport {
    ContactReport {
        contact_name: record.contact_name.trim().to_string(),
        company_name: record.company_name.trim().to_string(),
        linkedin_url: None,
        current_job_title: None,
        work_email: None,
        status: EnrichmentStatus::Failed,
        citation,
    }
}

#[async_trait]
impl<S: WebSearcher, M: ChatModel> Enricher for ContactEnricher<'_, S, M> {
    type Record = ContactRecord;
    type Report = ContactReport;

    async fn enrich(&self, record: &ContactRecord) -> Result<ContactReport> {
        Ok(self.run(record).await)
    }

    fn failure_report(&self, record: &ContactRecord, error: &EnrichError) -> ContactReport {
        failed_report(record, format!("Processing failed: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::testing::MockChatModel;
    use crate::traits::searcher::MockSearcher;

    #[tokio::test]
    async fn both_searches_failing_degrades_but_still_extracts() {
        let config = EnrichmentConfig::default().without_delays();
        let searcher = MockSearcher::new()
            .with_failure(
                &queries::linkedin_profile("Jane Doe", "Acme Corp"),
                ApiErrorKind::Timeout,
            )
            .with_failure(
                &queries::contact_background("Jane Doe", "Acme Corp"),
                ApiErrorKind::Timeout,
            );
        let model = MockChatModel::new().with_response(
            r#"{"linkedin_url": "NOT_FOUND", "current_job_title": "NOT_FOUND"}"#,
        );
        let enricher = ContactEnricher::new(&searcher, &model, &config);

        let report = enricher.run(&ContactRecord::new("Jane Doe", "Acme Corp")).await;

        // Extraction still ran against the failure placeholder context.
        assert_eq!(model.calls(), 1);
        assert_eq!(report.linkedin_url, None);
        assert_eq!(report.current_job_title, None);
        assert_eq!(report.work_email, None);
        assert_eq!(report.status, EnrichmentStatus::Failed);
    }
}
