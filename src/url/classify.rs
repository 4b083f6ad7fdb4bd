use crate::config::{StoragePatternEntry, DEFAULT_STORAGE_PATTERNS};

/// Label returned when no pattern matches
pub const OTHER_STORAGE: &str = "Other";

/// Ordered table of URL substring patterns and their storage labels
#[derive(Debug, Clone)]
pub struct StorageClassifier {
    /// (lowercase pattern, label) in match priority order
    patterns: Vec<(String, String)>,
}

impl Default for StorageClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_STORAGE_PATTERNS
                .iter()
                .map(|(pattern, label)| StoragePatternEntry {
                    pattern: pattern.to_string(),
                    label: label.to_string(),
                }),
        )
    }
}

impl StorageClassifier {
    /// Builds a classifier; iteration order of `entries` is match priority
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = StoragePatternEntry>,
    {
        Self {
            patterns: entries
                .into_iter()
                .map(|e| (e.pattern.to_lowercase(), e.label))
                .collect(),
        }
    }

    /// Returns the label of the first pattern contained in the URL
    ///
    /// Matching is case-insensitive substring containment. URLs that match
    /// nothing are classified as `"Other"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use broken_image_checker::url::StorageClassifier;
    ///
    /// let classifier = StorageClassifier::default();
    /// assert_eq!(classifier.classify("https://i.IMGUR.com/x.png"), "Imgur");
    /// assert_eq!(classifier.classify("https://example.com/x.png"), "Other");
    /// ```
    pub fn classify(&self, url: &str) -> &str {
        let lower_url = url.to_lowercase();
        self.patterns
            .iter()
            .find(|(pattern, _)| lower_url.contains(pattern.as_str()))
            .map(|(_, label)| label.as_str())
            .unwrap_or(OTHER_STORAGE)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
