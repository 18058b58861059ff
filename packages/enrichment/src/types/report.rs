//! Per-record output types.
//!
//! A report combines the original record fields with whatever was derived,
//! a status, and a human-readable citation explaining where each value came
//! from (or why it is absent). A record that could not be enriched is still
//! emitted, so no data is silently lost.

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// Outcome class for one enriched record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    /// The primary derived value was obtained and no step degraded.
    Success,
    /// Some but not all derived values were obtained, or a step degraded.
    Partial,
    /// Validation failed, or no derivation path produced a value.
    Failed,
}

impl EnrichmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EnrichmentStatus::Success => "success",
            EnrichmentStatus::Partial => "partial",
            EnrichmentStatus::Failed => "failed",
        }
    }
}

/// Enriched output for one contact record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReport {
    pub contact_name: String,
    pub company_name: String,

    /// LinkedIn profile URL, if the model found one in the search results.
    pub linkedin_url: Option<String>,

    /// Current job title at the given company.
    pub current_job_title: Option<String>,

    /// Candidate work email generated from name parts and the detected
    /// company domain (`first.last@domain`). Not verified.
    pub work_email: Option<String>,

    pub status: EnrichmentStatus,

    /// Provenance of the derived values, or the reason they are absent.
    pub citation: String,
}

/// Enriched output for one company record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyReport {
    pub company_name: String,
    pub company_region: String,
    pub company_domain: String,

    /// Most recent annual operating revenue in USD, as extracted.
    pub estimated_revenue_usd: Option<f64>,

    /// Display form of the revenue (e.g. "$1.50B", "Not Available").
    pub revenue_display: String,

    /// Static threshold classification, independent of any AI call.
    pub tier: Tier,

    pub tier_description: String,

    pub status: EnrichmentStatus,

    /// Provenance of the revenue figure, or the reason it is absent.
    pub citation: String,
}

/// Common view over report types, used by the batch driver for its
/// summary counters.
pub trait Enriched {
    fn status(&self) -> EnrichmentStatus;

    /// Tier label for the summary's tier distribution, where applicable.
    fn tier_label(&self) -> Option<&'static str> {
        None
    }
}

impl Enriched for ContactReport {
    fn status(&self) -> EnrichmentStatus {
        self.status
    }
}

impl Enriched for CompanyReport {
    fn status(&self) -> EnrichmentStatus {
        self.status
    }

    fn tier_label(&self) -> Option<&'static str> {
        Some(self.tier.label())
    }
}
