//! `enrich`: batch record enrichment from CSV files.
//!
//! Reads an input CSV, runs every row through the enrichment pipeline
//! sequentially, and writes three output files: a flat CSV, a JSON dump
//! of the full reports, and a plain-text summary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use enrichment::{
    run_batch, BatchSummary, BraveSearcher, ContactEnricher, EnrichmentConfig, OpenRouterChat,
    RevenueEnricher,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod io;

#[derive(Parser)]
#[command(name = "enrich", version, about = "Search- and LLM-backed record enrichment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enrich contacts with LinkedIn profile, job title and work email
    Contacts {
        /// Input CSV with `contact_name` and `company_name` columns
        input: PathBuf,

        /// Output path prefix; writes <prefix>.csv, <prefix>.json and
        /// <prefix>_summary.txt
        #[arg(default_value = "enriched_contacts")]
        output: String,

        /// Seconds to pause between records
        #[arg(long, default_value_t = 2.0)]
        delay: f64,

        /// Check the input file and exit without calling any API
        #[arg(long)]
        validate_only: bool,
    },

    /// Estimate company revenue and assign partnership tiers
    Companies {
        /// Input CSV with `Company Name`, `Company Region` and
        /// `Company Domain` columns
        input: PathBuf,

        /// Output path prefix; writes <prefix>.csv, <prefix>.json and
        /// <prefix>_summary.txt
        #[arg(default_value = "company_analysis")]
        output: String,

        /// Seconds to pause between records
        #[arg(long, default_value_t = 2.0)]
        delay: f64,

        /// Check the input file and exit without calling any API
        #[arg(long)]
        validate_only: bool,
    },

    /// Write a sample input CSV to get started
    Sample {
        /// Generate a contact input file
        #[arg(long, conflicts_with = "companies", required_unless_present = "companies")]
        contacts: bool,

        /// Generate a company input file
        #[arg(long)]
        companies: bool,

        /// Where to write the file
        #[arg(default_value = "sample_input.csv")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrichment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Contacts {
            input,
            output,
            delay,
            validate_only,
        } => run_contacts(&input, &output, delay, validate_only).await,
        Command::Companies {
            input,
            output,
            delay,
            validate_only,
        } => run_companies(&input, &output, delay, validate_only).await,
        Command::Sample {
            contacts, path, ..
        } => {
            if contacts {
                io::write_sample_contacts(&path)
            } else {
                io::write_sample_companies(&path)
            }
        }
    }
}

/// Build the runtime configuration, applying the `--delay` override.
fn load_config(delay: f64) -> Result<EnrichmentConfig> {
    if !delay.is_finite() || delay < 0.0 {
        bail!("--delay must be a non-negative number of seconds");
    }
    let config = EnrichmentConfig::from_env()
        .context("failed to load configuration")?
        .with_inter_record_delay(Duration::from_secs_f64(delay));
    Ok(config)
}

async fn run_contacts(input: &Path, output: &str, delay: f64, validate_only: bool) -> Result<()> {
    let records = io::read_contacts(input)?;
    tracing::info!(records = records.len(), input = %input.display(), "input file loaded");
    if validate_only {
        println!("{}: {} valid contact rows", input.display(), records.len());
        return Ok(());
    }

    let config = load_config(delay)?;
    let searcher = BraveSearcher::from_env()?;
    let model = OpenRouterChat::from_env(&config)?;
    tracing::info!(model = model.model(), "starting contact enrichment run");

    let enricher = ContactEnricher::new(&searcher, &model, &config);
    let run = run_batch(&enricher, &records, config.inter_record_delay).await;

    let summary = io::contact_summary_text(&run.summary);
    io::write_contact_outputs(output, &run, &summary)?;
    print_completion(output, &run.summary, &summary);
    Ok(())
}

async fn run_companies(input: &Path, output: &str, delay: f64, validate_only: bool) -> Result<()> {
    let records = io::read_companies(input)?;
    tracing::info!(records = records.len(), input = %input.display(), "input file loaded");
    if validate_only {
        println!("{}: {} valid company rows", input.display(), records.len());
        return Ok(());
    }

    let config = load_config(delay)?;
    let searcher = BraveSearcher::from_env()?;
    let model = OpenRouterChat::from_env(&config)?;
    tracing::info!(model = model.model(), "starting revenue analysis run");

    let enricher = RevenueEnricher::new(&searcher, &model, &config);
    let run = run_batch(&enricher, &records, config.inter_record_delay).await;

    let summary = io::company_summary_text(&run.summary);
    io::write_company_outputs(output, &run, &summary)?;
    print_completion(output, &run.summary, &summary);
    Ok(())
}

fn print_completion(prefix: &str, summary: &BatchSummary, summary_text: &str) {
    println!("{summary_text}");
    println!(
        "Wrote {prefix}.csv, {prefix}.json, {prefix}_summary.txt ({} records)",
        summary.total
    );
}
