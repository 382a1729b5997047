//! HTTP page fetching
//!
//! Fetches raw HTML from result URLs, one page at a time, with a fixed
//! per-request timeout. Extraction is a separate pure step.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::config::ContentFetchConfig;

/// A fetched page before extraction
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status_code: u16,
    pub html: String,
}

/// Content fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),

    /// URL is unsafe (bad scheme, localhost, private IP)
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
}

/// Trait for fetching page HTML
///
/// The orchestrator depends on this seam so tests can drive per-URL success
/// and failure without network access.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one URL and return its raw HTML
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// HTTP content fetcher
pub struct ContentFetcher {
    client: Client,
}

impl ContentFetcher {
    /// Create a new content fetcher
    pub fn new(config: &ContentFetchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Check if a URL is safe to fetch (http/https, not localhost/private IP)
    pub fn is_safe_url(url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }

        if let Some(host) = parsed.host_str() {
            let host = host.to_lowercase();
            if host == "localhost"
                || host.starts_with("127.")
                || host.starts_with("0.0.0.0")
                || host.starts_with("10.")
                || host.starts_with("192.168.")
                || host.starts_with("169.254.")
            {
                return false;
            }
            // 172.16.0.0/12
            if let Some(rest) = host.strip_prefix("172.") {
                if let Some(second) = rest.split('.').next().and_then(|s| s.parse::<u8>().ok()) {
                    if (16..=31).contains(&second) {
                        return false;
                    }
                }
            }
        }

        true
    }
}

#[async_trait]
impl PageFetcher for ContentFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching content from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(FetchedPage {
            url: url.to_string(),
            status_code: status.as_u16(),
            html,
        })
    }
}
