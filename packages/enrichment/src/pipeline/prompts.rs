//! LLM prompts for the enrichment pipeline.
//!
//! Each prompt pins the output to a small JSON object so the parser
//! cascade has something structured to recover.

use crate::traits::searcher::SearchHit;

/// System prompt for contact enrichment.
pub const CONTACT_SYSTEM_PROMPT: &str = r#"You are a professional contact enrichment specialist. Your task is to find LinkedIn profiles and current job titles for given contacts.

IMPORTANT INSTRUCTIONS:
1. You will receive a contact name, a company name, and web search results
2. Use the search results to find the person's LinkedIn profile URL
3. Extract their current job title at that company
4. Verify the person works at the specified company
5. If you cannot find the information, return "NOT_FOUND" for that field

OUTPUT FORMAT:
Return a JSON object with exactly these fields:
{
    "linkedin_url": "https://linkedin.com/in/username" or "NOT_FOUND",
    "current_job_title": "Job Title" or "NOT_FOUND"
}

Do not include any other text or explanation."#;

/// System prompt for revenue extraction.
pub const REVENUE_SYSTEM_PROMPT: &str = r#"You are a financial analyst extracting the most recent annual operating revenue for a company from web search results.

Rules:
1. Find the most recent annual operating revenue; use an estimate if no exact figure is available
2. Convert to USD if the figure is in another currency
3. Provide the specific source URL the figure came from
4. Prefer official financial reports, SEC filings, or investor relations pages
5. If multiple sources conflict, choose the most authoritative one
6. If you cannot find reliable revenue data, state that clearly

Respond in exactly this JSON format:
{
    "revenue_usd": <number in USD or null if not found>,
    "source_url": "<URL of the source or empty string if not found>",
    "confidence": "<high/medium/low>",
    "reasoning": "<brief explanation of how you arrived at this conclusion>"
}"#;

/// Format search hits for inclusion in a user prompt.
///
/// Numbered entries with title, URL and snippet; a failure placeholder
/// when there is nothing to show (the model is told so explicitly rather
/// than being handed an empty section).
pub fn format_hits(hits: &[SearchHit], limit: usize) -> String {
    if hits.is_empty() {
        return "No search results were available.".to_string();
    }

    hits.iter()
        .take(limit)
        .enumerate()
        .map(|(i, hit)| {
            let mut entry = format!(
                "{}. {}\n   URL: {}\n   Description: {}\n",
                i + 1,
                hit.title,
                hit.url,
                hit.snippet
            );
            if let Some(published) = &hit.published {
                entry.push_str(&format!("   Published: {published}\n"));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User prompt for contact enrichment.
pub fn contact_user_prompt(contact_name: &str, company_name: &str, search_context: &str) -> String {
    format!(
        "Contact Name: {contact_name}\n\
         Company Name: {company_name}\n\n\
         Search Results:\n{search_context}\n\n\
         Please find the LinkedIn profile URL and current job title for this person."
    )
}

/// User prompt for revenue extraction.
pub fn revenue_user_prompt(company_name: &str, search_context: &str) -> String {
    format!(
        "Company: {company_name}\n\n\
         Search Results:\n{search_context}\n\n\
         Extract the most recent annual operating revenue for this company."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_are_numbered_and_truncated() {
        let hits: Vec<SearchHit> = (0..5)
            .map(|i| SearchHit::new(format!("Title {i}"), format!("https://x.com/{i}"), "snip"))
            .collect();

        let text = format_hits(&hits, 3);
        assert!(text.contains("1. Title 0"));
        assert!(text.contains("3. Title 2"));
        assert!(!text.contains("Title 3"));
        assert!(!text.contains("Published:"));
    }

    #[test]
    fn publication_date_is_included_when_present() {
        let hits = vec![
            SearchHit::new("Annual report", "https://acme.com/ir", "FY24 results")
                .with_published("March 3, 2025"),
            SearchHit::new("Old post", "https://x.com/1", "snip"),
        ];

        let text = format_hits(&hits, 10);
        assert!(text.contains("   Published: March 3, 2025\n"));
        assert_eq!(text.matches("Published:").count(), 1);
    }

    #[test]
    fn empty_hits_get_placeholder() {
        assert_eq!(format_hits(&[], 10), "No search results were available.");
    }
}
