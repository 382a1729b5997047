// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search module
//!
//! Provides Perplexity-backed web search with per-result content enrichment:
//! - Single search requests via the `search` MCP tool
//! - Direct page capture via the `fetch` MCP tool
//!
//! Key properties:
//! - Result counts clamped to [1, 20] before any provider call
//! - Sequential per-result page fetching with a fixed 10s timeout
//! - Partial-failure isolation: one bad URL never aborts a batch
//! - Extraction always yields text, falling back to the whole document

pub mod config;
pub mod content;
pub mod perplexity;
pub mod provider;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use perplexity::PerplexitySearchProvider;
pub use provider::SearchProvider;
pub use service::SearchService;
pub use types::{
    ContentStatus, EnrichedResult, PageCapture, SearchBatch, SearchError, SearchRequest,
    SearchResult, DEFAULT_MAX_RESULTS, DEFAULT_MAX_TOKENS_PER_PAGE,
};

// Re-export content fetching types
pub use content::{
    extract_main_content, extract_title, ContentFetchConfig, ContentFetcher, ExtractedText,
    FetchError, FetchedPage, PageFetcher,
};
