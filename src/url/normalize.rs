use url::Url;

/// Payload characters kept from each end of a long data URI
const DATA_URI_KEEP: usize = 20;

/// Resolves an image `src` attribute against the page it appeared on
///
/// Relative references become absolute. `data:` URIs are kept verbatim
/// so their payload is not re-encoded, and a reference that cannot be
/// resolved is returned as written so it can still be checked and reported.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use broken_image_checker::url::resolve_image_url;
///
/// let page = Url::parse("https://example.com/article/42/intro").unwrap();
/// assert_eq!(resolve_image_url(&page, "../img/a.png"), "https://example.com/article/img/a.png");
/// assert_eq!(resolve_image_url(&page, "/img/a.png"), "https://example.com/img/a.png");
/// ```
pub fn resolve_image_url(page_url: &Url, src: &str) -> String {
    let src = src.trim();

    if src
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
    {
        return src.to_string();
    }

    match page_url.join(src) {
        Ok(absolute) => absolute.to_string(),
        Err(e) => {
            tracing::debug!("Could not resolve image src '{}' against {}: {}", src, page_url, e);
            src.to_string()
        }
    }
}

/// Shortens the payload of an embedded base64 image for reporting
///
/// `data:image/...` URIs whose payload exceeds 40 characters are rewritten
/// to `prefix,<first 20>...<last 20>`. Shorter payloads and every other URL
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use broken_image_checker::url::truncate_data_uri;
///
/// let payload = "A".repeat(20) + &"B".repeat(10) + &"C".repeat(20);
/// let uri = format!("data:image/png;base64,{}", payload);
/// assert_eq!(
///     truncate_data_uri(&uri),
///     format!("data:image/png;base64,{}...{}", "A".repeat(20), "C".repeat(20))
/// );
/// ```
pub fn truncate_data_uri(url: &str) -> String {
    if !url.starts_with("data:image") {
        return url.to_string();
    }

    let Some((prefix, payload)) = url.split_once(',') else {
        return url.to_string();
    };

    let length = payload.chars().count();
    if length <= DATA_URI_KEEP * 2 {
        return url.to_string();
    }

    let head: String = payload.chars().take(DATA_URI_KEEP).collect();
    let tail: String = payload.chars().skip(length - DATA_URI_KEEP).collect();
    format!("{},{}...{}", prefix, head, tail)
}
