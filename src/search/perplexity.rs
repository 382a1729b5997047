// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Perplexity Search API provider
//!
//! Implements web search using the Perplexity Search API. The API takes a
//! JSON POST with the query, a bounded result count, and an optional country
//! and domain filter, and returns ranked results with titles, URLs, snippets,
//! and dates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::config::SearchConfig;
use super::provider::SearchProvider;
use super::types::{SearchError, SearchRequest, SearchResult};

/// Perplexity Search API provider
pub struct PerplexitySearchProvider {
    api_key: String,
    api_url: String,
    timeout_ms: u64,
    client: Client,
}

impl PerplexitySearchProvider {
    /// Create a new Perplexity provider from configuration
    pub fn new(config: &SearchConfig) -> Self {
        Self::build(
            config.api_key.clone(),
            config.api_url.clone(),
            config.request_timeout_secs,
        )
    }

    /// Create a provider pointing at a non-default endpoint
    ///
    /// Used by tests to target a local mock server.
    pub fn with_api_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self::build(api_key.into(), api_url.into(), 10)
    }

    fn build(api_key: String, api_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            api_url,
            timeout_ms: timeout_secs * 1000,
            client,
        }
    }
}

#[async_trait]
impl SearchProvider for PerplexitySearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        let payload = PerplexityRequest {
            query: &request.query,
            max_results: request.max_results,
            max_tokens_per_page: request.max_tokens_per_page,
            country: request.country.as_deref(),
            search_domain_filter: request.domain_filter.as_deref(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(SearchError::RateLimited {
                retry_after_secs: 60,
            });
        }

        if status == 401 || status == 403 {
            return Err(SearchError::NoApiKey {
                provider: "perplexity".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: PerplexityResponse =
            response.json().await.map_err(|e| SearchError::ApiError {
                status: 0,
                message: format!("JSON parse error: {}", e),
            })?;

        Ok(data
            .results
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                snippet: r.snippet,
                date: r.date,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "perplexity"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, serde::Serialize)]
struct PerplexityRequest<'a> {
    query: &'a str,
    max_results: usize,
    max_tokens_per_page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_domain_filter: Option<&'a [String]>,
}

#[derive(Debug, serde::Deserialize)]
struct PerplexityResponse {
    #[serde(default)]
    results: Vec<PerplexityResult>,
}

#[derive(Debug, serde::Deserialize)]
struct PerplexityResult {
    title: Option<String>,
    url: Option<String>,
    snippet: Option<String>,
    date: Option<String>,
}
