// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;

use super::types::{DEFAULT_MAX_RESULTS, DEFAULT_MAX_TOKENS_PER_PAGE};

/// Default Perplexity Search API endpoint
pub const DEFAULT_API_URL: &str = "https://api.perplexity.ai/search";

/// Configuration for web search functionality
///
/// Constructed once at startup and passed into the service; no module-level
/// state.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Perplexity Search API key
    pub api_key: String,
    /// Search API endpoint (overridable for tests)
    pub api_url: String,
    /// Search request timeout in seconds
    pub request_timeout_secs: u64,
    /// Default number of results per search
    pub default_max_results: usize,
    /// Default per-page token budget forwarded to the API
    pub default_max_tokens_per_page: usize,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("PERPLEXITY_API_KEY").unwrap_or_default(),
            api_url: env::var("PERPLEXITY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout_secs: env::var("SEARCH_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            default_max_results: DEFAULT_MAX_RESULTS,
            default_max_tokens_per_page: DEFAULT_MAX_TOKENS_PER_PAGE,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("PERPLEXITY_API_KEY is not set".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Search request timeout must be at least 1 second".to_string());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 10,
            default_max_results: DEFAULT_MAX_RESULTS,
            default_max_tokens_per_page: DEFAULT_MAX_TOKENS_PER_PAGE,
        }
    }
}
