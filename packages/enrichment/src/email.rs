//! Work-email candidate generation and company-domain detection.
//!
//! The generated address is a best-effort guess in the most common
//! corporate pattern (`first.last@domain`); it is never verified.

use url::Url;

use crate::traits::searcher::SearchHit;

/// Hosts that never carry a company's own email domain.
const SKIP_HOSTS: &[&str] = &[
    "linkedin.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "indeed.com",
    "glassdoor.com",
    "crunchbase.com",
];

/// Normalize a raw domain or URL to a bare lowercase host.
///
/// Accepts "Acme.com", "https://www.acme.com/about", "www.acme.com".
/// Returns `None` when nothing host-shaped remains.
pub fn clean_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let host = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Url::parse(trimmed).ok()?.host_str()?.to_string()
    } else {
        trimmed.split('/').next()?.to_string()
    };

    let host = host.trim().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    if host.is_empty() || !host.contains('.') {
        return None;
    }
    Some(host)
}

/// Generate a candidate work email from name parts and a domain.
///
/// Two or more name parts give `first.last@domain`; a single part gives
/// `first@domain`. The result is lowercased and stripped to
/// `[a-z0-9.@-]`.
pub fn candidate_email(contact_name: &str, domain: &str) -> Option<String> {
    let domain = clean_domain(domain)?;
    let name = contact_name.trim().to_lowercase();
    let parts: Vec<&str> = name.split_whitespace().collect();

    let local = match parts.as_slice() {
        [] => return None,
        [single] => single.to_string(),
        [first, .., last] => format!("{first}.{last}"),
    };

    let email: String = format!("{local}@{domain}")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '@' | '-'))
        .collect();

    // Sanitization can strip the entire local part (e.g. non-ASCII names).
    if email.starts_with('@') {
        return None;
    }
    Some(email)
}

/// Pick a company domain out of official-website search results.
///
/// Walks the hits in order, skipping social-media and job-board hosts,
/// and returns the first parseable domain.
pub fn detect_domain(hits: &[SearchHit]) -> Option<String> {
    for hit in hits {
        let Some(domain) = clean_domain(&hit.url) else {
            continue;
        };
        if SKIP_HOSTS.iter().any(|skip| domain.ends_with(skip)) {
            continue;
        }
        tracing::debug!(%domain, "detected company domain");
        return Some(domain);
    }
    None
}
