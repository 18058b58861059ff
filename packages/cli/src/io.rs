//! File input and output for the `enrich` tool.
//!
//! Input CSVs are checked for their required columns before any record
//! is processed, so a malformed file fails the whole run up front.
//! Output rows map absent values to the literal `NOT_FOUND` to keep the
//! CSV flat; the JSON dump keeps them as `null`.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use enrichment::{
    BatchRun, BatchSummary, CompanyRecord, CompanyReport, ContactRecord, ContactReport, Tier,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

const NOT_FOUND: &str = "NOT_FOUND";

const CONTACT_COLUMNS: &[&str] = &["contact_name", "company_name"];
const COMPANY_COLUMNS: &[&str] = &["Company Name", "Company Region", "Company Domain"];

pub fn read_contacts(path: &Path) -> Result<Vec<ContactRecord>> {
    let file =
        fs::File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    read_records(file, CONTACT_COLUMNS)
        .with_context(|| format!("invalid contact input file {}", path.display()))
}

pub fn read_companies(path: &Path) -> Result<Vec<CompanyRecord>> {
    let file =
        fs::File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    read_records(file, COMPANY_COLUMNS)
        .with_context(|| format!("invalid company input file {}", path.display()))
}

fn read_records<T: DeserializeOwned>(input: impl Read, required: &[&str]) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers().context("cannot read CSV header row")?;
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        bail!(
            "missing required column(s): {} (found: {})",
            missing.join(", "),
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row.context("malformed CSV row")?);
    }
    if records.is_empty() {
        bail!("no data rows");
    }
    Ok(records)
}

/// Flat CSV shape for one enriched contact.
#[derive(Serialize)]
struct ContactRow<'a> {
    contact_name: &'a str,
    company_name: &'a str,
    linkedin_url: &'a str,
    current_job_title: &'a str,
    work_email: &'a str,
    status: &'a str,
    citation: &'a str,
}

fn contact_row(report: &ContactReport) -> ContactRow<'_> {
    ContactRow {
        contact_name: &report.contact_name,
        company_name: &report.company_name,
        linkedin_url: report.linkedin_url.as_deref().unwrap_or(NOT_FOUND),
        current_job_title: report.current_job_title.as_deref().unwrap_or(NOT_FOUND),
        work_email: report.work_email.as_deref().unwrap_or(NOT_FOUND),
        status: report.status.as_str(),
        citation: &report.citation,
    }
}

/// Flat CSV shape for one analyzed company.
#[derive(Serialize)]
struct CompanyRow<'a> {
    #[serde(rename = "Company Name")]
    company_name: &'a str,
    #[serde(rename = "Company Region")]
    company_region: &'a str,
    #[serde(rename = "Company Domain")]
    company_domain: &'a str,
    estimated_revenue_usd: String,
    revenue_display: &'a str,
    tier: &'static str,
    tier_description: &'a str,
    status: &'a str,
    citation: &'a str,
}

fn company_row(report: &CompanyReport) -> CompanyRow<'_> {
    CompanyRow {
        company_name: &report.company_name,
        company_region: &report.company_region,
        company_domain: &report.company_domain,
        estimated_revenue_usd: report
            .estimated_revenue_usd
            .map(|r| format!("{r:.0}"))
            .unwrap_or_else(|| NOT_FOUND.to_string()),
        revenue_display: &report.revenue_display,
        tier: report.tier.label(),
        tier_description: &report.tier_description,
        status: report.status.as_str(),
        citation: &report.citation,
    }
}

pub fn write_contact_outputs(
    prefix: &str,
    run: &BatchRun<ContactReport>,
    summary_text: &str,
) -> Result<()> {
    write_csv(&format!("{prefix}.csv"), run.reports.iter().map(contact_row))?;
    write_json(&format!("{prefix}.json"), &run.reports)?;
    write_text(&format!("{prefix}_summary.txt"), summary_text)
}

pub fn write_company_outputs(
    prefix: &str,
    run: &BatchRun<CompanyReport>,
    summary_text: &str,
) -> Result<()> {
    write_csv(&format!("{prefix}.csv"), run.reports.iter().map(company_row))?;
    write_json(&format!("{prefix}.json"), &run.reports)?;
    write_text(&format!("{prefix}_summary.txt"), summary_text)
}

fn write_csv<T: Serialize>(path: &str, rows: impl Iterator<Item = T>) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("cannot write {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: Serialize>(path: &str, reports: &[T]) -> Result<()> {
    let body = serde_json::to_string_pretty(reports)?;
    fs::write(path, body).with_context(|| format!("cannot write {path}"))
}

fn write_text(path: &str, body: &str) -> Result<()> {
    fs::write(path, body).with_context(|| format!("cannot write {path}"))
}

pub fn contact_summary_text(summary: &BatchSummary) -> String {
    summary_text("Contact Enrichment Summary", summary, false)
}

pub fn company_summary_text(summary: &BatchSummary) -> String {
    summary_text("Company Revenue Analysis Summary", summary, true)
}

fn summary_text(title: &str, summary: &BatchSummary, with_tiers: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!(
        "Generated: {}\n\n",
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    ));
    out.push_str(&format!("Total records: {}\n", summary.total));
    out.push_str(&format!("Success: {}\n", summary.success));
    out.push_str(&format!("Partial: {}\n", summary.partial));
    out.push_str(&format!("Failed: {}\n", summary.failed));
    out.push_str(&format!("Success rate: {:.1}%\n", summary.success_rate()));

    if with_tiers {
        out.push_str("\nTier Distribution:\n");
        for tier in Tier::all() {
            let count = summary.tiers.get(tier.label()).copied().unwrap_or(0);
            out.push_str(&format!("  {}: {}\n", tier.label(), count));
        }
        out.push_str("\nTier Definitions:\n");
        for tier in Tier::all() {
            out.push_str(&format!("  {}: {}\n", tier.label(), tier.description()));
        }
    }
    out
}

pub fn write_sample_contacts(path: &Path) -> Result<()> {
    let body = "\
contact_name,company_name
Satya Nadella,Microsoft
Sundar Pichai,Google
Jane Doe,Acme Corp
";
    fs::write(path, body).with_context(|| format!("cannot write {}", path.display()))?;
    println!("Wrote sample contact input to {}", path.display());
    Ok(())
}

pub fn write_sample_companies(path: &Path) -> Result<()> {
    let body = "\
Company Name,Company Region,Company Domain
Microsoft,North America,microsoft.com
Spotify,Europe,spotify.com
Acme Corp,,
";
    fs::write(path, body).with_context(|| format!("cannot write {}", path.display()))?;
    println!("Wrote sample company input to {}", path.display());
    Ok(())
}
