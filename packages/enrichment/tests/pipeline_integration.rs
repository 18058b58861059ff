//! Integration tests for the enrichment pipeline.
//!
//! Exercise the full per-record flow against mocked search and chat
//! backends: validation short-circuits, graceful degradation on search
//! and parse failures, email derivation, and batch idempotence.

use std::time::Duration;

use enrichment::search::queries;
use enrichment::testing::MockChatModel;
use enrichment::{
    run_batch, ApiErrorKind, CompanyRecord, ContactEnricher, ContactRecord, Enricher,
    EnrichmentConfig, EnrichmentStatus, MockSearcher, RevenueEnricher, SearchHit, Tier,
    UNPARSED_CITATION_PREFIX,
};

fn test_config() -> EnrichmentConfig {
    EnrichmentConfig::default().without_delays()
}

/// A searcher primed for the Jane Doe / Acme Corp scenario, optionally
/// able to resolve Acme's website (and thus the email domain).
fn jane_doe_searcher(with_domain: bool) -> MockSearcher {
    let mut searcher = MockSearcher::new()
        .with_hits(
            &queries::linkedin_profile("Jane Doe", "Acme Corp"),
            vec![SearchHit::new(
                "Jane Doe - Senior Engineer at Acme Corp | LinkedIn",
                "https://linkedin.com/in/janedoe",
                "Senior Engineer at Acme Corp",
            )],
        )
        .with_hits(&queries::contact_background("Jane Doe", "Acme Corp"), vec![]);

    if with_domain {
        searcher = searcher.with_hits(
            &queries::official_website("Acme Corp"),
            vec![SearchHit::new("Acme Corp - Home", "https://www.acme.com", "")],
        );
    }
    searcher
}

const JANE_DOE_EXTRACTION: &str =
    r#"{"linkedin_url": "https://linkedin.com/in/janedoe", "current_job_title": "Senior Engineer", "email": null}"#;

#[tokio::test]
async fn contact_success_when_domain_detected() {
    let config = test_config();
    let searcher = jane_doe_searcher(true);
    let model = MockChatModel::new().with_response(JANE_DOE_EXTRACTION);
    let enricher = ContactEnricher::new(&searcher, &model, &config);

    let report = enricher
        .enrich(&ContactRecord::new("Jane Doe", "Acme Corp"))
        .await
        .unwrap();

    assert_eq!(report.status, EnrichmentStatus::Success);
    assert_eq!(
        report.current_job_title.as_deref(),
        Some("Senior Engineer")
    );
    assert_eq!(report.work_email.as_deref(), Some("jane.doe@acme.com"));
    assert_eq!(report.citation, "LinkedIn profile");
}

#[tokio::test]
async fn contact_partial_when_domain_undetected() {
    let config = test_config();
    let searcher = jane_doe_searcher(false);
    let model = MockChatModel::new().with_response(JANE_DOE_EXTRACTION);
    let enricher = ContactEnricher::new(&searcher, &model, &config);

    let report = enricher
        .enrich(&ContactRecord::new("Jane Doe", "Acme Corp"))
        .await
        .unwrap();

    assert_eq!(report.status, EnrichmentStatus::Partial);
    assert_eq!(
        report.current_job_title.as_deref(),
        Some("Senior Engineer")
    );
    assert_eq!(report.work_email, None);
}

#[tokio::test]
async fn empty_identity_fails_without_any_calls() {
    let config = test_config();
    let searcher = MockSearcher::new();
    let model = MockChatModel::new();
    let enricher = ContactEnricher::new(&searcher, &model, &config);

    for identity in ["", "   ", "\t"] {
        let report = enricher
            .enrich(&ContactRecord::new(identity, "Acme Corp"))
            .await
            .unwrap();
        assert_eq!(report.status, EnrichmentStatus::Failed);
        assert!(report.citation.contains("validation"));
    }

    assert_eq!(searcher.calls(), 0);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn company_without_hints_passes_validation() {
    let config = test_config();
    let searcher = MockSearcher::new();
    let model = MockChatModel::new()
        .with_response(r#"{"revenue_usd": null, "source_url": "", "confidence": "low", "reasoning": "no data"}"#);
    let enricher = RevenueEnricher::new(&searcher, &model, &config);

    // No region, no domain: hint fields are optional.
    let report = enricher
        .enrich(&CompanyRecord::new("Acme Corp"))
        .await
        .unwrap();

    assert_ne!(report.status, EnrichmentStatus::Failed);
    assert_eq!(report.tier, Tier::Unknown);
}

#[tokio::test]
async fn search_failure_degrades_but_extraction_still_runs() {
    let config = test_config();
    let searcher = MockSearcher::new().with_failure(
        &queries::company_financials("Acme Corp", Some("acme.com")),
        ApiErrorKind::RateLimited,
    );
    let model = MockChatModel::new().with_response(
        r#"{"revenue_usd": 750000000, "source_url": "https://acme.com/ir", "confidence": "medium", "reasoning": "estimate"}"#,
    );
    let enricher = RevenueEnricher::new(&searcher, &model, &config);

    let record = CompanyRecord::new("Acme Corp").with_domain("acme.com");
    let report = enricher.enrich(&record).await.unwrap();

    // Model was still consulted despite the failed search.
    assert_eq!(model.calls(), 1);
    assert_eq!(report.estimated_revenue_usd, Some(750_000_000.0));
    assert_eq!(report.tier, Tier::Platinum);
    // Revenue found but search degraded: partial, not success.
    assert_eq!(report.status, EnrichmentStatus::Partial);
}

#[tokio::test]
async fn unparsable_model_output_degrades_with_citation() {
    let config = test_config();
    let searcher = MockSearcher::new().with_hits(
        &queries::company_financials("Acme Corp", None),
        vec![SearchHit::new("Acme revenue", "https://news.example.com", "$2B")],
    );
    let model =
        MockChatModel::new().with_response("I'm sorry, I cannot provide structured data.");
    let enricher = RevenueEnricher::new(&searcher, &model, &config);

    let report = enricher
        .enrich(&CompanyRecord::new("Acme Corp"))
        .await
        .unwrap();

    assert_eq!(report.estimated_revenue_usd, None);
    assert_eq!(report.tier, Tier::Unknown);
    assert_eq!(report.status, EnrichmentStatus::Partial);
    assert!(report.citation.starts_with(UNPARSED_CITATION_PREFIX));
}

#[tokio::test]
async fn exhausted_retries_yield_failed_report_not_error() {
    let config = test_config();
    let searcher = MockSearcher::new().with_failure(
        &queries::company_financials("Acme Corp", None),
        ApiErrorKind::ServerError,
    );
    let model = MockChatModel::new()
        .with_error(ApiErrorKind::ServerError)
        .with_error(ApiErrorKind::ServerError)
        .with_error(ApiErrorKind::ServerError);
    let enricher = RevenueEnricher::new(&searcher, &model, &config);

    let report = enricher
        .enrich(&CompanyRecord::new("Acme Corp"))
        .await
        .unwrap();

    assert_eq!(model.calls(), 3);
    assert_eq!(report.status, EnrichmentStatus::Failed);
    assert!(report.citation.contains("after 3 attempt"));
}

#[tokio::test]
async fn batch_is_idempotent_under_fixed_responses() {
    let records = vec![
        CompanyRecord::new("Acme Corp").with_domain("acme.com"),
        CompanyRecord::new("Globex"),
        CompanyRecord::new(""), // validation failure
    ];

    let run_once = || async {
        let config = test_config();
        let searcher = MockSearcher::new()
            .with_hits(
                &queries::company_financials("Acme Corp", Some("acme.com")),
                vec![SearchHit::new("10-K", "https://acme.com/10k", "$1.2B revenue")],
            )
            .with_hits(&queries::company_financials("Globex", None), vec![]);
        let model = MockChatModel::new()
            .with_response(r#"{"revenue_usd": 1200000000, "source_url": "https://acme.com/10k", "confidence": "high", "reasoning": "filing"}"#)
            .with_response(r#"{"revenue_usd": null, "source_url": "", "confidence": "low", "reasoning": "nothing found"}"#);
        let enricher = RevenueEnricher::new(&searcher, &model, &config);
        run_batch(&enricher, &records, Duration::ZERO).await
    };

    let first = run_once().await;
    let second = run_once().await;

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.reports.len(), second.reports.len());
    for (a, b) in first.reports.iter().zip(second.reports.iter()) {
        assert_eq!(a.company_name, b.company_name);
        assert_eq!(a.estimated_revenue_usd, b.estimated_revenue_usd);
        assert_eq!(a.tier, b.tier);
        assert_eq!(a.status, b.status);
        assert_eq!(a.citation, b.citation);
    }

    // Spot-check the run itself.
    assert_eq!(first.summary.total, 3);
    assert_eq!(first.reports[0].tier, Tier::SuperPlatinum);
    assert_eq!(first.reports[0].status, EnrichmentStatus::Success);
    assert_eq!(first.reports[2].status, EnrichmentStatus::Failed);
    assert_eq!(first.summary.tiers.get("Super Platinum"), Some(&1));
    assert_eq!(first.summary.tiers.get("Unknown"), Some(&2));
}
