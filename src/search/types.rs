// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search and content enrichment

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Default number of results per search
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default per-page token budget forwarded to the search API
pub const DEFAULT_MAX_TOKENS_PER_PAGE: usize = 1024;

/// Result-count bounds enforced before any provider call
pub const MIN_RESULTS: usize = 1;
pub const MAX_RESULTS: usize = 20;

/// Maximum number of domain filter entries accepted by the search API
pub const MAX_DOMAIN_FILTERS: usize = 20;

/// Parameters for a single search operation
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The search query string
    pub query: String,
    /// Number of results to request (clamped to [1, 20])
    pub max_results: usize,
    /// Per-page token budget forwarded to the search API
    pub max_tokens_per_page: usize,
    /// ISO 3166-1 alpha-2 country code (e.g. "US", "GB")
    pub country: Option<String>,
    /// Domains to restrict results to (truncated to 20 entries)
    pub domain_filter: Option<Vec<String>>,
}

impl SearchRequest {
    /// Create a request with default result and token budgets
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            max_tokens_per_page: DEFAULT_MAX_TOKENS_PER_PAGE,
            country: None,
            domain_filter: None,
        }
    }

    /// Clamp `max_results` to [1, 20] and truncate `domain_filter` to 20 entries
    pub fn normalized(mut self) -> Self {
        self.max_results = self.max_results.clamp(MIN_RESULTS, MAX_RESULTS);
        if let Some(ref mut domains) = self.domain_filter {
            domains.truncate(MAX_DOMAIN_FILTERS);
        }
        self
    }
}

/// A single search result as returned by a provider
///
/// All fields are optional: providers routinely omit dates, and a result
/// without a URL is still reported to the caller (content status
/// `not_attempted`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
    pub date: Option<String>,
}

/// Per-result content extraction status
///
/// Serialized as the strings `not_attempted`, `success`, or `error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentStatus {
    /// The result had no URL, so no fetch was attempted
    NotAttempted,
    /// Page fetched and content extracted
    Success,
    /// The page fetch failed; extraction never fails on fetched HTML
    Error(String),
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttempted => write!(f, "not_attempted"),
            Self::Success => write!(f, "success"),
            Self::Error(message) => write!(f, "error: {}", message),
        }
    }
}

impl Serialize for ContentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "not_attempted" => Self::NotAttempted,
            "success" => Self::Success,
            other => Self::Error(other.strip_prefix("error: ").unwrap_or(other).to_string()),
        })
    }
}

/// A search result enriched with fetched page content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
    pub date: Option<String>,
    /// Extracted page content, capped at the search-path limit (None unless
    /// the fetch succeeded)
    pub content: Option<String>,
    pub content_extraction_status: ContentStatus,
}

/// Response from a search operation with per-result enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBatch {
    /// The original search query
    pub query: String,
    /// All provider results, each carrying its own content status
    pub results: Vec<EnrichedResult>,
    /// Number of results returned
    pub total_results: usize,
    /// Time taken for the search plus enrichment in milliseconds
    pub search_time_ms: u64,
    /// Provider that returned the results
    pub provider: String,
}

/// Content captured from a directly fetched page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCapture {
    pub url: String,
    /// Page `<title>` text if present
    pub title: Option<String>,
    /// Extracted content, capped at the fetch-path limit
    pub content: String,
    /// Character count of the extracted content before truncation
    pub content_length: usize,
    /// Upstream HTTP status code
    pub status_code: u16,
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rate limited by the search provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// API error from the search provider
    #[error("Search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 when the request never completed)
        status: u16,
        /// Error message
        message: String,
    },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// No API key configured for the provider
    #[error("No API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing an API key
        provider: String,
    },

    /// Invalid search query
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// Reason the query is invalid
        reason: String,
    },
}
