//! Sitemap fetching and `<loc>` extraction
//!
//! Both sitemap indexes and URL sets are read the same way: every `<loc>`
//! element's text, in document order. Whether a location is a child
//! sitemap or a page is decided by the caller.

use crate::crawler::fetcher::fetch_document;
use crate::CheckerError;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use std::time::Duration;

/// Extracts the trimmed text of every `<loc>` element
///
/// Namespace prefixes are ignored and empty locations are skipped. Parsing
/// is lenient: mismatched or stray end tags are tolerated, text with a bare
/// `&` is kept as written, and a syntax error ends parsing with the
/// locations read so far.
pub fn parse_sitemap_locs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut locs = Vec::new();
    let mut buf = Vec::new();
    let mut in_loc = false;
    let mut current = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"loc" => {
                in_loc = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"loc" => {
                if in_loc {
                    let loc = current.trim();
                    if !loc.is_empty() {
                        locs.push(loc.to_string());
                    }
                }
                in_loc = false;
            }
            Ok(Event::Text(e)) if in_loc => match e.unescape() {
                Ok(text) => current.push_str(&text),
                Err(_) => current.push_str(&String::from_utf8_lossy(&e)),
            },
            Ok(Event::CData(e)) if in_loc => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::error!(
                    "Sitemap XML error at position {}: {}. Keeping {} locations read so far",
                    reader.error_position(),
                    e,
                    locs.len()
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    locs
}

/// Fetches a sitemap and returns its locations
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Locations listed by the sitemap
/// * `Err(CheckerError)` - Fetch failed or non-2xx status
pub async fn fetch_sitemap(client: &Client, url: &str, timeout: Duration) -> Result<Vec<String>, CheckerError> {
    let body = fetch_document(client, url, timeout).await?;
    Ok(parse_sitemap_locs(&body))
}
