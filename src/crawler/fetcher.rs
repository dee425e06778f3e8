//! HTTP fetcher implementation
//!
//! This module wraps the HTTP client behind the [`Fetch`] trait:
//! - Building HTTP clients with the configured user agent and timeouts
//! - Single GET per URL, no retries
//! - Mapping transport errors and non-2xx statuses to [`FetchError`]

use crate::config::HttpConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Source of page bodies
///
/// Implementations must not retry: a failed fetch is reported to the caller,
/// which decides what to do with it.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns the full response body
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use breadth_crawl::config::HttpConfig;
/// use breadth_crawl::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetch`] implementation backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from configuration and wraps it
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    /// Issues one GET request
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | body bytes |
    /// | other status | `FetchError::Status` |
    /// | timeout | `FetchError::Timeout` |
    /// | connect/TLS/redirect error | `FetchError::Transport` |
    /// | body interrupted | `FetchError::Body` |
    ///
    /// The response (and with it the pooled connection) is dropped on every
    /// path out of this function.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(body.to_vec())
    }
}

/// Classifies an error raised while sending a request
fn classify_transport_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
