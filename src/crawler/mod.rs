//! Crawler module for page fetching and image checking
//!
//! This module contains the core checking logic, including:
//! - HTTP fetching of pages and sitemaps
//! - Content image extraction
//! - Image reachability and domain policy checks
//! - Sitemap walking with bounded concurrency

mod checker;
mod coordinator;
mod fetcher;
mod parser;
mod pipeline;
mod sitemap;

pub use checker::ImageChecker;
pub use coordinator::{run_check, Coordinator, PageResults, RunOutcome};
pub use fetcher::{build_http_client, decode_body, describe_error, fetch_document};
pub use parser::{HtmlPageParser, PageParser, ParsedPage};
pub use pipeline::PagePipeline;
pub use sitemap::{fetch_sitemap, parse_sitemap_locs};

use crate::config::RunConfig;
use crate::CheckerError;

/// Runs a complete check
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client and page pipeline
/// 2. Check the single page, or walk the sitemap tree
/// 3. Write the CSV report
///
/// # Returns
///
/// * `Ok(RunOutcome)` - Run finished; the report path is `None` if writing failed
/// * `Err(CheckerError)` - The root sitemap could not be loaded
pub async fn check(run: RunConfig) -> Result<RunOutcome, CheckerError> {
    run_check(run).await
}
