use url::Url;

/// Extracts the lowercase host of a URL string
///
/// Malformed URLs and URLs without a host (`data:`, `blob:`, relative
/// strings) yield an empty string.
///
/// # Examples
///
/// ```
/// use broken_image_checker::url::extract_host;
///
/// assert_eq!(extract_host("https://CDN.Example.com:8443/a.png"), "cdn.example.com");
/// assert_eq!(extract_host("data:image/png;base64,AAAA"), "");
/// assert_eq!(extract_host("not a url"), "");
/// ```
pub fn extract_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default()
}

/// Allow-list of image hosts
///
/// An entry allows every host that contains it as a substring, compared
/// case-insensitively. The match is not anchored to label boundaries, so
/// `example.com` also admits `evil-example.com.attacker.net`.
#[derive(Debug, Clone)]
pub struct DomainPolicy {
    allowed: Vec<String>,
}

impl DomainPolicy {
    /// Creates a policy from the configured allow-list
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Returns true if the URL's host contains any allowed entry
    ///
    /// # Examples
    ///
    /// ```
    /// use broken_image_checker::url::DomainPolicy;
    ///
    /// let policy = DomainPolicy::new(["example.com"]);
    /// assert!(policy.is_allowed("https://cdn.EXAMPLE.com/logo.png"));
    /// assert!(!policy.is_allowed("https://other.org/logo.png"));
    /// ```
    pub fn is_allowed(&self, url: &str) -> bool {
        let host = extract_host(url);
        let allowed = !host.is_empty() && self.allowed.iter().any(|entry| host.contains(entry));
        tracing::debug!(
            "Domain check for {} -> domain: {}, allowed: {}",
            url,
            host,
            allowed
        );
        allowed
    }

    /// The normalized allow-list entries
    pub fn entries(&self) -> &[String] {
        &self.allowed
    }
}
