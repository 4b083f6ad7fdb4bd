//! HTTP fetcher implementation
//!
//! This module handles building the shared HTTP client and fetching whole
//! documents (pages and sitemaps). Image probes live in the checker.

use crate::config::UserAgentConfig;
use crate::CheckerError;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::error::Error as StdError;
use std::time::Duration;

/// Maximum redirect hops followed for any request
const MAX_REDIRECTS: usize = 10;

/// How far into a body to look for a `<meta>` charset declaration
const META_SNIFF_LIMIT: usize = 1024;

/// Builds the HTTP client shared by every page, sitemap and image request
///
/// Redirects are followed. Timeouts are set per request, so the client
/// itself carries only a connect timeout.
///
/// # Example
///
/// ```no_run
/// use broken_image_checker::config::UserAgentConfig;
/// use broken_image_checker::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a document body with GET
///
/// # Returns
///
/// * `Ok(String)` - The decoded body of a 2xx response
/// * `Err(CheckerError::HttpStatus)` - The server answered outside 2xx
/// * `Err(CheckerError::Http)` - Timeout, connection or body read failure
pub async fn fetch_document(client: &Client, url: &str, timeout: Duration) -> Result<String, CheckerError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|source| CheckerError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CheckerError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let header_charset = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_from_content_type);

    let body = response.bytes().await.map_err(|source| CheckerError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(decode_body(&body, header_charset.as_deref()))
}

/// Decodes a document body to text
///
/// The charset comes from the `Content-Type` header, then from a `<meta>`
/// declaration near the start of the body, then defaults to UTF-8. A byte
/// order mark overrides all of them. Invalid sequences become U+FFFD.
pub fn decode_body(body: &[u8], header_charset: Option<&str>) -> String {
    let encoding = header_charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .or_else(|| sniff_meta_charset(body).and_then(|label| Encoding::for_label(label.as_bytes())))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        } else {
            None
        }
    })
}

/// Finds `<meta charset=...>` or `<meta http-equiv ... content="...; charset=...">`
fn sniff_meta_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    head.match_indices("<meta").find_map(|(start, _)| {
        let tag = &head[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        let value = &tag[tag.find("charset=")? + "charset=".len()..];
        let value = value.trim_start_matches(|c| c == '"' || c == '\'');
        let label: String = value
            .chars()
            .take_while(|&c| !matches!(c, '"' | '\'' | ';' | '/' | ' ' | '>'))
            .collect();
        (!label.is_empty()).then_some(label)
    })
}

/// Renders an error and all of its sources as one line
///
/// reqwest keeps the useful part of a failure (`operation timed out`,
/// `dns error`, ...) in the source chain rather than its own message.
pub fn describe_error(error: &(dyn StdError + 'static)) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}
