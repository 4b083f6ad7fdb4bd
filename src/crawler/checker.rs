//! Image reachability checks
//!
//! An image passes when its host is on the allow-list and a probe for it
//! ends in a 2xx status. Every other outcome is returned as a
//! [`FailureReason`]; nothing here is a program error.

use crate::crawler::fetcher::describe_error;
use crate::output::FailureReason;
use crate::url::DomainPolicy;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;

/// Checks image URLs against the domain policy and the network
#[derive(Debug, Clone)]
pub struct ImageChecker {
    client: Client,
    policy: DomainPolicy,
    timeout: Duration,
}

impl ImageChecker {
    pub fn new(client: Client, policy: DomainPolicy, timeout: Duration) -> Self {
        Self {
            client,
            policy,
            timeout,
        }
    }

    /// Checks one image URL
    ///
    /// # Check Flow
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Host not on allow-list | `CSP Violation`, no request made |
    /// | HEAD answers 405 | Retried once with GET |
    /// | Final status 200-299 | `None` (pass) |
    /// | Final status otherwise | `HTTP <status>` |
    /// | Timeout, DNS or connection failure | `Network Error: <detail>` |
    pub async fn check(&self, url: &str) -> Option<FailureReason> {
        if !self.policy.is_allowed(url) {
            tracing::info!(
                "CSP violation: Image {} is not hosted on an allowed domain.",
                url
            );
            return Some(FailureReason::CspViolation);
        }

        let status = match self.probe(Method::HEAD, url).await {
            Ok(status) if status == StatusCode::METHOD_NOT_ALLOWED => {
                tracing::debug!("HEAD not allowed for {}; trying GET.", url);
                self.probe(Method::GET, url).await
            }
            other => other,
        };

        match status {
            Ok(status) => {
                tracing::debug!("Fetched {} with status code {}", url, status.as_u16());
                if status.is_success() {
                    None
                } else {
                    tracing::info!(
                        "Image {} returned non-2xx status code: {}",
                        url,
                        status.as_u16()
                    );
                    Some(FailureReason::HttpStatus(status.as_u16()))
                }
            }
            Err(e) => {
                let detail = describe_error(&e);
                tracing::error!("Network error for image {}: {}", url, detail);
                Some(FailureReason::Network(detail))
            }
        }
    }

    /// Sends one request and returns its final status
    ///
    /// The body of a GET is never read; dropping the response closes the
    /// stream.
    async fn probe(&self, method: Method, url: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .send()
            .await?;
        Ok(response.status())
    }

    pub fn policy(&self) -> &DomainPolicy {
        &self.policy
    }
}
