//! Run coordinator - single page and sitemap orchestration
//!
//! This module drives a run end to end:
//! - Building the shared HTTP client and page pipeline
//! - Checking one page, or walking a sitemap tree batch by batch
//! - Writing the CSV report

use crate::config::{RunConfig, RunMode};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::pipeline::PagePipeline;
use crate::crawler::sitemap::fetch_sitemap;
use crate::output::{save_report, ImageRecord};
use crate::CheckerError;
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Records gathered from a set of pages
#[derive(Debug, Clone, Default)]
pub struct PageResults {
    /// Broken images, in completion order
    pub records: Vec<ImageRecord>,

    /// Pages whose processing finished (successfully fetched or not)
    pub pages_checked: usize,
}

impl PageResults {
    fn merge(&mut self, other: PageResults) {
        self.records.extend(other.records);
        self.pages_checked += other.pages_checked;
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub records: Vec<ImageRecord>,
    pub pages_checked: usize,

    /// Written report, or `None` if writing it failed
    pub report_path: Option<PathBuf>,
}

/// Main run coordinator structure
pub struct Coordinator {
    run: RunConfig,
    client: Client,
    pipeline: Arc<PagePipeline>,
}

impl Coordinator {
    /// Creates a coordinator with a fresh HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Client and pipeline ready
    /// * `Err(CheckerError)` - The client or the content selectors could not be built
    pub fn new(run: RunConfig) -> Result<Self, CheckerError> {
        let client = build_http_client(&run.settings.user_agent)?;
        let pipeline = PagePipeline::new(client.clone(), &run.settings)?;
        Ok(Self::with_pipeline(run, client, pipeline))
    }

    /// Creates a coordinator around an existing client and pipeline
    pub fn with_pipeline(run: RunConfig, client: Client, pipeline: PagePipeline) -> Self {
        Self {
            run,
            client,
            pipeline: Arc::new(pipeline),
        }
    }

    /// Runs the configured mode and writes the report
    ///
    /// In sitemap mode a root sitemap that cannot be fetched ends
    /// the run with an error and no report is written. Every other failure
    /// is logged and the run carries on.
    pub async fn run(&self) -> Result<RunOutcome, CheckerError> {
        let target = self.run.target.as_str();

        let results = match self.run.mode {
            RunMode::Single => self.check_single_page(target).await,
            RunMode::All => self.walk_sitemap(target).await?,
        };

        let output_dir = Path::new(&self.run.settings.output.directory);
        let report_path = save_report(&results.records, output_dir, self.run.mode.report_prefix());

        Ok(RunOutcome {
            records: results.records,
            pages_checked: results.pages_checked,
            report_path,
        })
    }

    /// Checks one page
    pub async fn check_single_page(&self, page_url: &str) -> PageResults {
        tracing::info!("Checking single page: {}", page_url);
        let records = self.pipeline.process_page(page_url).await;

        if records.is_empty() {
            tracing::info!("No broken images found.");
        } else {
            tracing::info!("Found {} broken images on {}", records.len(), page_url);
        }

        PageResults {
            records,
            pages_checked: 1,
        }
    }

    /// Walks a sitemap index and checks every page it leads to
    ///
    /// Child sitemaps are processed strictly in listing order. The pages of
    /// one child are checked concurrently, bounded by `max-concurrent-pages`,
    /// and the run pauses for `batch-pause` after each child. A child that
    /// fails to load is skipped.
    ///
    /// # Returns
    ///
    /// * `Ok(PageResults)` - Records from all batches, order not guaranteed
    /// * `Err(CheckerError)` - The root sitemap could not be fetched
    pub async fn walk_sitemap(&self, root_sitemap_url: &str) -> Result<PageResults, CheckerError> {
        let checker = &self.run.settings.checker;
        let timeout = checker.request_timeout();

        let sitemap_urls = fetch_sitemap(&self.client, root_sitemap_url, timeout)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to retrieve main sitemap: {}. Error: {}",
                    root_sitemap_url,
                    e
                );
                e
            })?;
        tracing::info!("Found {} sitemap URLs.", sitemap_urls.len());

        let mut results = PageResults::default();

        for sitemap_url in &sitemap_urls {
            let page_urls = match fetch_sitemap(&self.client, sitemap_url, timeout).await {
                Ok(urls) => urls,
                Err(e) => {
                    tracing::error!("Failed to retrieve sitemap: {}. Error: {}", sitemap_url, e);
                    continue;
                }
            };

            tracing::info!(
                "Checking {} pages from sitemap {}",
                page_urls.len(),
                sitemap_url
            );
            results.merge(self.check_batch(page_urls).await);

            pause(checker.batch_pause()).await;
        }

        tracing::info!("Total broken images found: {}", results.records.len());
        Ok(results)
    }

    /// Checks a batch of pages on a worker pool created for this batch
    ///
    /// Results are collected as pages finish. A page task that panics is
    /// logged and contributes no records.
    async fn check_batch(&self, page_urls: Vec<String>) -> PageResults {
        let workers = self.run.settings.checker.max_concurrent_pages.max(1) as usize;
        let semaphore = Arc::new(Semaphore::new(workers));
        let mut pending = FuturesUnordered::new();

        for page_url in page_urls {
            let pipeline = Arc::clone(&self.pipeline);
            let semaphore = Arc::clone(&semaphore);
            let task_url = page_url.clone();

            let handle = tokio::spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail
                let _permit = semaphore.acquire_owned().await.ok();
                pipeline.process_page(&task_url).await
            });

            pending.push(async move { (page_url, handle.await) });
        }

        let mut results = PageResults::default();
        while let Some((page_url, joined)) = pending.next().await {
            match joined {
                Ok(records) => {
                    results.pages_checked += 1;
                    results.records.extend(records);
                }
                Err(e) => {
                    tracing::error!("Error for URL: {}. Exception: {}", page_url, e);
                }
            }
        }

        results
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Runs a complete check described by `run`
pub async fn run_check(run: RunConfig) -> Result<RunOutcome, CheckerError> {
    let coordinator = Coordinator::new(run)?;
    coordinator.run().await
}
