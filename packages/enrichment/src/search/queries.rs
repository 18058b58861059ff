//! Query construction for the enrichment searches.
//!
//! Quoting names keeps the provider from splitting them into loose terms;
//! `site:` filters steer toward specific hosts: LinkedIn for contact
//! profiles, professional data aggregators for company financials.

/// Professional data aggregators that publish company revenue figures,
/// in the order the revenue search tries them.
pub const PROFESSIONAL_DATA_SITES: &[&str] = &[
    "rocketreach.co",
    "apollo.io",
    "hunter.io",
    "zoominfo.com",
    "clearbit.com",
    "crunchbase.com",
];

/// LinkedIn profile lookup for a person at a company.
pub fn linkedin_profile(contact_name: &str, company_name: &str) -> String {
    format!(r#"site:linkedin.com "{contact_name}" "{company_name}""#)
}

/// General background lookup for a person at a company.
pub fn contact_background(contact_name: &str, company_name: &str) -> String {
    format!(r#""{contact_name}" "{company_name}" profile bio about"#)
}

/// Company-data lookup on one professional site, optionally scoped by domain.
pub fn professional_site(site: &str, company_name: &str, company_domain: Option<&str>) -> String {
    let mut query = format!(r#"site:{site} "{company_name}" revenue financial company data"#);
    if let Some(domain) = company_domain {
        query.push_str(&format!(" ({domain})"));
    }
    query
}

/// Generic financial-information lookup, the fallback when no
/// professional site has anything. Optionally scoped by domain.
pub fn company_financials(company_name: &str, company_domain: Option<&str>) -> String {
    let mut query = format!(
        r#""{company_name}" annual revenue revenue financial results earnings report"#
    );
    if let Some(domain) = company_domain {
        query.push_str(&format!(" ({domain})"));
    }
    query
}

/// Official-website lookup, used to detect a company's email domain.
pub fn official_website(company_name: &str) -> String {
    format!(r#""{company_name}" official website"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkedin_query_quotes_both_names() {
        let q = linkedin_profile("Jane Doe", "Acme Corp");
        assert_eq!(q, r#"site:linkedin.com "Jane Doe" "Acme Corp""#);
    }

    #[test]
    fn professional_site_query_scopes_to_the_site() {
        let q = professional_site("rocketreach.co", "Acme Corp", Some("acme.com"));
        assert_eq!(
            q,
            r#"site:rocketreach.co "Acme Corp" revenue financial company data (acme.com)"#
        );

        let q = professional_site("apollo.io", "Acme Corp", None);
        assert_eq!(q, r#"site:apollo.io "Acme Corp" revenue financial company data"#);
    }

    #[test]
    fn financials_query_appends_domain_when_present() {
        let q = company_financials("Acme Corp", Some("acme.com"));
        assert!(q.starts_with(r#""Acme Corp" annual revenue"#));
        assert!(q.ends_with("(acme.com)"));

        let q = company_financials("Acme Corp", None);
        assert!(!q.contains('('));
    }
}
