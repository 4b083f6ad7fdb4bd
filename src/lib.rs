//! Broken image checker
//!
//! This crate crawls web pages, either one page directly or every page listed
//! by a sitemap tree, extracts the images of each page's content region,
//! validates them for reachability and domain policy, classifies where each
//! broken image is stored and writes the findings to a CSV report.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for checker operations
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid run mode '{0}': expected 'single' or 'all'")]
    InvalidMode(String),
}

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, RunConfig, RunMode};
pub use output::{FailureReason, ImageRecord};
pub use crate::url::{article_id, DomainPolicy, StorageClassifier};
