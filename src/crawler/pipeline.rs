//! Per-page processing
//!
//! Fetches one page, extracts its content images and checks each of them,
//! turning every failed check into an [`ImageRecord`].

use crate::config::Config;
use crate::crawler::checker::ImageChecker;
use crate::crawler::fetcher::fetch_document;
use crate::crawler::parser::{HtmlPageParser, PageParser, ParsedPage};
use crate::output::ImageRecord;
use crate::url::{article_id, DomainPolicy, StorageClassifier};
use crate::{CheckerError, ConfigError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Checks the images of one page at a time
///
/// Shared between concurrent page tasks behind an `Arc`; holds no mutable
/// state.
pub struct PagePipeline {
    client: Client,
    parser: Arc<dyn PageParser>,
    checker: ImageChecker,
    classifier: StorageClassifier,
    request_timeout: Duration,
    page_delay: Duration,
}

impl PagePipeline {
    /// Creates a pipeline using the `scraper` based parser
    pub fn new(client: Client, settings: &Config) -> Result<Self, ConfigError> {
        let parser = HtmlPageParser::new(settings.checker.content_selectors.as_slice())?;
        Ok(Self::with_parser(client, settings, Arc::new(parser)))
    }

    /// Creates a pipeline with a caller-supplied page parser
    pub fn with_parser(client: Client, settings: &Config, parser: Arc<dyn PageParser>) -> Self {
        let request_timeout = settings.checker.request_timeout();
        let checker = ImageChecker::new(
            client.clone(),
            DomainPolicy::new(&settings.checker.allowed_domains),
            request_timeout,
        );

        Self {
            client,
            parser,
            checker,
            classifier: StorageClassifier::new(settings.storage_patterns.iter().cloned()),
            request_timeout,
            page_delay: settings.checker.page_delay(),
        }
    }

    /// Fetches a page and returns its title and normalized image URLs
    pub async fn extract_images(&self, page_url: &str) -> Result<ParsedPage, CheckerError> {
        let url = Url::parse(page_url)?;
        let body = fetch_document(&self.client, page_url, self.request_timeout).await?;
        Ok(self.parser.parse_page(&body, &url))
    }

    /// Checks every content image of a page
    ///
    /// Waits for the configured page delay first. A page that cannot be
    /// fetched is logged and contributes no records; passing images
    /// contribute no records either.
    pub async fn process_page(&self, page_url: &str) -> Vec<ImageRecord> {
        if !self.page_delay.is_zero() {
            tokio::time::sleep(self.page_delay).await;
        }

        let parsed = match self.extract_images(page_url).await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Failed to retrieve {}. Error: {}", page_url, e);
                return Vec::new();
            }
        };

        let article_id = article_id(page_url);
        let mut broken_images = Vec::new();

        for image_url in parsed.image_urls {
            let Some(reason) = self.checker.check(&image_url).await else {
                continue;
            };

            let storage = self.classifier.classify(&image_url).to_string();
            tracing::info!(
                "Flagging broken image: {} -> {} (Storage: {})",
                image_url,
                reason,
                storage
            );

            broken_images.push(ImageRecord {
                article_id: article_id.clone(),
                title: parsed.title.clone(),
                page_url: page_url.to_string(),
                broken_image_url: image_url,
                failure_reason: reason,
                storage_location: storage,
            });
        }

        broken_images
    }

    pub fn classifier(&self) -> &StorageClassifier {
        &self.classifier
    }
}
