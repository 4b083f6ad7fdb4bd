//! URL handling module
//!
//! This module provides image URL normalization, the image host allow-list,
//! storage classification, and article ID extraction.

mod classify;
mod domain;
mod normalize;

// Re-export main functions
pub use classify::{StorageClassifier, OTHER_STORAGE};
pub use domain::{extract_host, DomainPolicy};
pub use normalize::{resolve_image_url, truncate_data_uri};

use url::Url;

/// Extracts the article ID from a page URL
///
/// The ID is the path segment immediately following the first literal
/// `article` segment. Pages without such a segment, or where `article` is
/// the last segment, have an empty ID.
///
/// # Examples
///
/// ```
/// use broken_image_checker::url::article_id;
///
/// assert_eq!(article_id("https://help.example.com/s/article/000123/reset"), "000123");
/// assert_eq!(article_id("https://help.example.com/s/articles"), "");
/// ```
pub fn article_id(page_url: &str) -> String {
    let Ok(url) = Url::parse(page_url) else {
        return String::new();
    };

    let Some(segments) = url.path_segments() else {
        return String::new();
    };

    segments
        .filter(|s| !s.is_empty())
        .skip_while(|s| *s != "article")
        .nth(1)
        .map(|s| s.to_string())
        .unwrap_or_default()
}
