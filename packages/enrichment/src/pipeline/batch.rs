//! Batch driver: strictly sequential record processing.
//!
//! Records run in input order with a configurable sleep between them,
//! deliberately polite toward rate-limited providers, so no
//! concurrency. An enricher error for one record becomes a failed report
//! and never stops the batch.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{EnrichError, Result};
use crate::types::report::{Enriched, EnrichmentStatus};

/// Per-record enrichment, as seen by the batch driver.
#[async_trait]
pub trait Enricher: Send + Sync {
    type Record: Send + Sync;
    type Report: Enriched + Send;

    /// Enrich one record. Expected failures are already folded into the
    /// report; an `Err` is reserved for faults that escaped the
    /// orchestrator.
    async fn enrich(&self, record: &Self::Record) -> Result<Self::Report>;

    /// Fallback report for a record whose enrichment faulted.
    fn failure_report(&self, record: &Self::Record, error: &EnrichError) -> Self::Report;
}

/// Aggregate counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub failed: usize,
    /// Tier label → count, populated for revenue runs.
    pub tiers: BTreeMap<&'static str, usize>,
}

impl BatchSummary {
    fn from_reports<R: Enriched>(reports: &[R]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.status() {
                EnrichmentStatus::Success => summary.success += 1,
                EnrichmentStatus::Partial => summary.partial += 1,
                EnrichmentStatus::Failed => summary.failed += 1,
            }
            if let Some(tier) = report.tier_label() {
                *summary.tiers.entry(tier).or_default() += 1;
            }
        }
        summary
    }

    /// Fraction of records that ended `success`, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.success as f64 / self.total as f64 * 100.0
    }
}

/// Results of one batch run.
#[derive(Debug)]
pub struct BatchRun<R> {
    pub reports: Vec<R>,
    pub summary: BatchSummary,
}

/// Process `records` sequentially, sleeping `delay` between them.
pub async fn run_batch<E: Enricher>(
    enricher: &E,
    records: &[E::Record],
    delay: Duration,
) -> BatchRun<E::Report> {
    let total = records.len();
    let mut reports = Vec::with_capacity(total);

    for (i, record) in records.iter().enumerate() {
        tracing::info!(record = i + 1, total, "processing record");

        let report = match enricher.enrich(record).await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(record = i + 1, error = %err, "record enrichment faulted");
                enricher.failure_report(record, &err)
            }
        };
        reports.push(report);

        if i + 1 < total && delay > Duration::ZERO {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "inter-record delay");
            tokio::time::sleep(delay).await;
        }
    }

    let summary = BatchSummary::from_reports(&reports);
    tracing::info!(
        total = summary.total,
        success = summary.success,
        partial = summary.partial,
        failed = summary.failed,
        "batch completed"
    );

    BatchRun { reports, summary }
}
