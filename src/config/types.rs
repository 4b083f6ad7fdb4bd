use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::ConfigError;

/// Allow-list used when none is configured
pub const DEFAULT_ALLOWED_DOMAINS: [&str; 2] = ["example.com", "cdn.example.com"];

/// Content container selector used when none is configured
pub const DEFAULT_CONTENT_SELECTORS: [&str; 1] = [".article-detail-card-content"];

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "reports/broken_images";

/// Storage classification table used when none is configured.
///
/// Order is match priority: the first pattern found in a URL wins.
pub const DEFAULT_STORAGE_PATTERNS: [(&str, &str); 16] = [
    ("s3.amazonaws.com", "Amazon Web Services"),
    ("data:image", "Base64 Encoded Image"),
    ("blob:", "Blob"),
    ("box.com", "Box"),
    ("confluence", "Confluence"),
    ("etrack:", "Etrack"),
    ("googleusercontent", "Google CDN"),
    ("chat.google.com", "Google Chat"),
    ("mail.google.com", "Google Mail"),
    ("gstatic.com", "Google Static Content"),
    ("imgur", "Imgur"),
    ("jira", "JIRA"),
    ("c:\\", "Local"),
    ("file:///", "Local"),
    ("wp-content", "WordPress"),
    ("zendesk", "Zendesk"),
];

/// Main configuration structure for the checker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub checker: CheckerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(rename = "storage-pattern")]
    pub storage_patterns: Vec<StoragePatternEntry>,
}

/// Checker behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Host substrings that images may be served from
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// CSS selectors of the content containers whose images are checked
    #[serde(rename = "content-selectors")]
    pub content_selectors: Vec<String>,

    /// Timeout applied to every network call (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Delay before each page fetch (milliseconds)
    #[serde(rename = "page-delay")]
    pub page_delay: u64,

    /// Pause after each child sitemap batch (milliseconds)
    #[serde(rename = "batch-pause")]
    pub batch_pause: u64,

    /// Number of pages checked concurrently within a sitemap batch
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: u32,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            content_selectors: DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            request_timeout: 10,
            page_delay: 1000,
            batch_pause: 2000,
            max_concurrent_pages: 2,
        }
    }
}

impl CheckerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "BrokenImageChecker".to_string(),
            version: "1.0".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value, e.g. `BrokenImageChecker/1.0`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV reports are written to
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
        }
    }
}

/// One entry of the storage classification table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoragePatternEntry {
    /// Substring looked for in the image URL
    pub pattern: String,

    /// Human-readable storage label reported for a match
    pub label: String,
}

/// What a run checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One page URL in, one report out
    Single,
    /// One root sitemap URL in, one report out
    All,
}

impl RunMode {
    /// File name prefix of the report this mode produces
    pub fn report_prefix(&self) -> &'static str {
        match self {
            Self::Single => "broken_images_single_page",
            Self::All => "broken_images_all_pages",
        }
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Everything a run needs, validated before any network activity
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,

    /// Page URL in single mode, root sitemap URL in all mode
    ///
    /// Kept as given (trimmed) so reports show the URL the user asked for.
    /// Always parses as an absolute URL.
    pub target: String,

    pub settings: Config,
}
