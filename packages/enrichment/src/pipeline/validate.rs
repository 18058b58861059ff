//! Input sanitization for the orchestrators.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{EnrichError, Result};

/// Minimum length of the principal identity field after trimming.
const MIN_IDENTITY_LEN: usize = 2;

fn domain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("domain pattern is valid")
    })
}

/// Sanitize the principal identity field (person or company name).
///
/// Trims whitespace; anything shorter than two characters is a hard
/// validation failure for this record.
pub fn sanitize_identity(label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.len() < MIN_IDENTITY_LEN {
        return Err(EnrichError::Validation(format!(
            "{label} must be a non-empty string of at least {MIN_IDENTITY_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalize an optional domain hint.
///
/// Null/empty/whitespace-only becomes absent. A present value that does
/// not look like a domain is logged as a warning but still passed
/// through: the hint degrades search quality at worst, so it never
/// blocks the record.
pub fn normalize_domain_hint(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if !domain_pattern().is_match(trimmed) {
        tracing::warn!(domain = %trimmed, "company domain may not be in valid format");
    }
    Some(trimmed.to_string())
}
