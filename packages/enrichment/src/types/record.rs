//! Input record types.
//!
//! Serde field names follow the expected CSV column headers, so records
//! deserialize straight from the input file.

use serde::{Deserialize, Serialize};

/// One input row for contact enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Full name of the person; the principal identity field.
    pub contact_name: String,

    /// Company the person works at. Used as a search hint.
    #[serde(default)]
    pub company_name: String,
}

impl ContactRecord {
    pub fn new(contact_name: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            contact_name: contact_name.into(),
            company_name: company_name.into(),
        }
    }
}

/// One input row for company revenue analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Company name; the principal identity field.
    #[serde(rename = "Company Name")]
    pub company_name: String,

    /// Optional region hint, carried through to the output unchanged.
    #[serde(rename = "Company Region", default)]
    pub company_region: String,

    /// Optional domain hint (e.g. "acme.com"). A malformed domain is
    /// logged and ignored, never a hard failure.
    #[serde(rename = "Company Domain", default)]
    pub company_domain: String,
}

impl CompanyRecord {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            company_region: String::new(),
            company_domain: String::new(),
        }
    }

    /// Set the region hint.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.company_region = region.into();
        self
    }

    /// Set the domain hint.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.company_domain = domain.into();
        self
    }
}
