use std::fmt;

/// Why an image was flagged
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// Image host is not on the allow-list; no request was made
    CspViolation,

    /// The probe completed with a status outside 200-299
    HttpStatus(u16),

    /// The probe failed before a status was received
    Network(String),
}

impl FailureReason {
    /// Coarse grouping used in run statistics
    ///
    /// Network errors are folded into one bucket since their detail text is
    /// different for nearly every failure.
    pub fn category(&self) -> String {
        match self {
            Self::Network(_) => "Network Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CspViolation => write!(f, "CSP Violation"),
            Self::HttpStatus(status) => write!(f, "HTTP {}", status),
            Self::Network(detail) => write!(f, "Network Error: {}", detail),
        }
    }
}

/// One broken image found on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Path segment following `article` in the page URL, or empty
    pub article_id: String,

    /// Page title, or empty
    pub title: String,

    pub page_url: String,

    /// Absolute image URL, with data URI payloads shortened
    pub broken_image_url: String,

    pub failure_reason: FailureReason,

    /// Storage label classified from `broken_image_url`
    pub storage_location: String,
}

impl ImageRecord {
    /// Row values in report column order
    pub fn to_row(&self) -> [String; 6] {
        [
            self.article_id.clone(),
            self.title.clone(),
            self.page_url.clone(),
            self.broken_image_url.clone(),
            self.failure_reason.to_string(),
            self.storage_location.clone(),
        ]
    }
}
