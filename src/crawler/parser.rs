//! HTML parser for extracting a page's title and content images
//!
//! Only images inside the configured content containers are collected;
//! navigation, headers and footers are ignored.

use crate::url::{resolve_image_url, truncate_data_uri};
use crate::ConfigError;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Whitespace-normalized `<title>` text, or empty
    pub title: String,

    /// Image URLs in document order, absolute or as shortened data URIs
    pub image_urls: Vec<String>,
}

/// Turns page markup into a [`ParsedPage`]
///
/// Implementations must be usable from concurrent page tasks.
pub trait PageParser: Send + Sync {
    fn parse_page(&self, html: &str, page_url: &Url) -> ParsedPage;
}

/// [`PageParser`] backed by `scraper` CSS selectors
#[derive(Debug, Clone)]
pub struct HtmlPageParser {
    /// (source text, compiled selector) for each content container
    containers: Vec<(String, Selector)>,
    image: Selector,
    title: Selector,
}

impl HtmlPageParser {
    /// Compiles the content container selectors
    ///
    /// # Returns
    ///
    /// * `Ok(HtmlPageParser)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector is not valid CSS
    pub fn new<S: AsRef<str>>(container_selectors: &[S]) -> Result<Self, ConfigError> {
        let containers = container_selectors
            .iter()
            .map(|s| {
                let s = s.as_ref();
                Selector::parse(s)
                    .map(|selector| (s.to_string(), selector))
                    .map_err(|e| {
                        ConfigError::Validation(format!("Invalid content selector '{}': {:?}", s, e))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            containers,
            image: parse_static_selector("img[src]")?,
            title: parse_static_selector("title")?,
        })
    }

    fn extract_title(&self, document: &Html) -> String {
        document
            .select(&self.title)
            .next()
            .map(|element| {
                element
                    .text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    fn extract_images(&self, document: &Html, page_url: &Url) -> Vec<String> {
        let mut images = Vec::new();

        for (source, selector) in &self.containers {
            let mut found_container = false;

            for container in document.select(selector) {
                found_container = true;
                let before = images.len();

                for image in container.select(&self.image) {
                    if let Some(src) = image.value().attr("src") {
                        let image_url = truncate_data_uri(&resolve_image_url(page_url, src));
                        tracing::debug!("Found image: {}", image_url);
                        images.push(image_url);
                    }
                }

                tracing::debug!(
                    "Found {} images in container {}.",
                    images.len() - before,
                    source
                );
            }

            if !found_container {
                tracing::debug!("Container {} not found in {}.", source, page_url);
            }
        }

        images
    }
}

impl PageParser for HtmlPageParser {
    fn parse_page(&self, html: &str, page_url: &Url) -> ParsedPage {
        let document = Html::parse_document(html);

        ParsedPage {
            title: self.extract_title(&document),
            image_urls: self.extract_images(&document, page_url),
        }
    }
}

fn parse_static_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::Validation(format!("Invalid selector '{}': {:?}", selector, e)))
}
