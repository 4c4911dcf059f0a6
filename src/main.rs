//! Pagelens main entry point
//!
//! Command-line driver for the page analysis service: submits analyses,
//! polls them to completion, and manages the persisted result records.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pagelens::config::{load_config_with_hash, Config};
use pagelens::job::JobStatus;
use pagelens::service::AnalysisService;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Pagelens: web page analysis
///
/// Pagelens fetches a page, extracts its title, markup version and
/// login-form presence, classifies its hyperlinks as internal or external,
/// and probes every link for breakage. Results are persisted and can be
/// listed or re-run later.
#[derive(Parser, Debug)]
#[command(name = "pagelens")]
#[command(version = "0.1.0")]
#[command(about = "Analyze a web page and verify its links", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a URL for analysis and wait for the result
    Analyze {
        /// The page URL to analyze
        url: String,
    },

    /// Re-run analysis for a persisted record and wait for the result
    Rerun {
        /// The record id to re-analyze
        id: i64,
    },

    /// List all persisted analysis records, newest first
    List,

    /// Delete a persisted analysis record
    Delete {
        /// The record id to delete
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration (defaults when no file is given)
    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!(
                "Loaded configuration from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let service = AnalysisService::open(config).context("Failed to start analysis service")?;

    match cli.command {
        Command::Analyze { url } => handle_analyze(&service, &url).await?,
        Command::Rerun { id } => handle_rerun(&service, id).await?,
        Command::List => handle_list(&service)?,
        Command::Delete { id } => handle_delete(&service, id)?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagelens=info,warn"),
            1 => EnvFilter::new("pagelens=debug,info"),
            2 => EnvFilter::new("pagelens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `analyze`: submits the URL and polls the job to completion
async fn handle_analyze(service: &AnalysisService, url: &str) -> anyhow::Result<()> {
    let record = service.submit(url)?;
    println!("Submitted analysis job {} for {}", record.id, record.url);

    let job = wait_for_job(service, record.id).await?;
    print_job(&job);
    Ok(())
}

/// Handles `rerun`: re-queues a persisted record and polls to completion
async fn handle_rerun(service: &AnalysisService, id: i64) -> anyhow::Result<()> {
    let record = service.rerun(id)?;
    println!("Re-running analysis job {} for {}", record.id, record.url);

    let job = wait_for_job(service, record.id).await?;
    print_job(&job);
    Ok(())
}

/// Polls the registry until the job reaches a terminal state
async fn wait_for_job(
    service: &AnalysisService,
    id: i64,
) -> anyhow::Result<pagelens::job::Job> {
    loop {
        let job = service.job_status(id)?;
        if job.status.is_terminal() {
            return Ok(job);
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}

/// Prints a finished job's report
fn print_job(job: &pagelens::job::Job) {
    println!();
    println!("Job {}: {}", job.id, job.status);
    println!("URL: {}", job.url);

    if job.status == JobStatus::Error {
        println!("Analysis failed; no results recorded.");
        return;
    }

    if let Some(report) = &job.report {
        println!("Title: {}", report.title);
        println!("Markup version: {}", report.html_version);
        println!("Internal links: {}", report.internal_links);
        println!("External links: {}", report.external_links);
        println!(
            "Login form: {}",
            if report.login_form { "yes" } else { "no" }
        );

        if report.broken_links.is_empty() {
            println!("Broken links: none");
        } else {
            println!("Broken links ({}):", report.broken_links.len());
            for finding in &report.broken_links {
                if finding.status_code == 0 {
                    println!("  - {} [{}] unreachable", finding.url, finding.scope.label());
                } else {
                    println!(
                        "  - {} [{}] HTTP {}",
                        finding.url,
                        finding.scope.label(),
                        finding.status_code
                    );
                }
            }
        }
    }
}

/// Handles `list`: prints all persisted records, newest first
fn handle_list(service: &AnalysisService) -> anyhow::Result<()> {
    let records = service.records()?;

    if records.is_empty() {
        println!("No analysis records.");
        return Ok(());
    }

    println!("{} analysis record(s):", records.len());
    for record in records {
        println!(
            "  {} [{}] {}: {} internal / {} external, {} broken (submitted {})",
            record.id,
            record.status,
            record.url,
            record.internal_links,
            record.external_links,
            record.broken_links.len(),
            record.valid_from.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}

/// Handles `delete`: removes a persisted record
fn handle_delete(service: &AnalysisService, id: i64) -> anyhow::Result<()> {
    service.delete(id)?;
    println!("Deleted analysis record {}", id);
    Ok(())
}
