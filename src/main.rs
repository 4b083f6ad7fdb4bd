//! Broken image checker main entry point
//!
//! This is the command-line interface for the broken image checker.

use anyhow::Context;
use broken_image_checker::config::{build_run_config, load_config_with_hash, Config};
use broken_image_checker::crawler::check;
use broken_image_checker::output::{print_statistics, ReportStatistics};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Broken image checker
///
/// Checks the content images of one page, or of every page listed by a
/// sitemap tree, and writes the broken ones to a timestamped CSV report.
#[derive(Parser, Debug)]
#[command(name = "broken-image-checker")]
#[command(version)]
#[command(about = "Finds broken images on web pages and reports them as CSV", long_about = None)]
struct Cli {
    /// Run mode: 'single' checks one page, 'all' walks a sitemap index
    #[arg(value_name = "MODE")]
    mode: String,

    /// Page URL (single mode) or root sitemap URL (all mode)
    #[arg(value_name = "URL")]
    target: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Allowed image domain; repeat or separate with commas
    #[arg(short, long = "allowed-domain", value_name = "DOMAIN", value_delimiter = ',')]
    allowed_domains: Vec<String>,

    /// Directory the CSV report is written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let settings = load_settings(&cli)?;

    let run = match build_run_config(&cli.mode, &cli.target, settings) {
        Ok(run) => run,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Mode: {}, target: {}, allowed domains: {:?}",
        run.mode,
        run.target,
        run.settings.checker.allowed_domains
    );

    let outcome = match check(run).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Check failed: {}", e);
            return Err(e.into());
        }
    };

    let stats = ReportStatistics::from_records(&outcome.records, outcome.pages_checked);
    if !cli.quiet {
        print_statistics(&stats);
    }

    match &outcome.report_path {
        Some(path) => tracing::info!("Check completed, report: {}", path.display()),
        None => tracing::info!("Check completed, no report was written"),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("broken_image_checker=info,warn"),
            1 => EnvFilter::new("broken_image_checker=debug,info"),
            2 => EnvFilter::new("broken_image_checker=trace,debug"),
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

/// Loads the configuration file, if any, and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let allowed: Vec<String> = cli
        .allowed_domains
        .iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    if !allowed.is_empty() {
        settings.checker.allowed_domains = allowed;
    }

    if let Some(dir) = &cli.output_dir {
        settings.output.directory = dir.to_string_lossy().into_owned();
    }

    Ok(settings)
}
