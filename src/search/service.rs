// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Coordinates the search provider and per-result content enrichment.
//! Enrichment is strictly sequential, one page at a time, and a failed
//! fetch for one URL never aborts the batch.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::content::{
    extract_main_content, extract_title, ContentFetchConfig, ContentFetcher, FetchError,
    PageFetcher,
};
use super::perplexity::PerplexitySearchProvider;
use super::provider::SearchProvider;
use super::types::{
    ContentStatus, EnrichedResult, PageCapture, SearchBatch, SearchError, SearchRequest,
    SearchResult,
};

/// Main search service that orchestrates the provider and content enrichment
pub struct SearchService {
    provider: Box<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    content_config: ContentFetchConfig,
}

impl SearchService {
    /// Create a new search service from configuration
    pub fn new(search_config: SearchConfig, content_config: ContentFetchConfig) -> Self {
        let provider = Box::new(PerplexitySearchProvider::new(&search_config));
        debug!("Perplexity search provider enabled");
        let fetcher = Arc::new(ContentFetcher::new(&content_config));

        Self {
            provider,
            fetcher,
            content_config,
        }
    }

    /// Create a service with explicit components
    ///
    /// Used by tests to substitute mock providers and fetchers.
    pub fn with_components(
        provider: Box<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        content_config: ContentFetchConfig,
    ) -> Self {
        Self {
            provider,
            fetcher,
            content_config,
        }
    }

    /// Perform a search and enrich each result with extracted page content
    ///
    /// The result count is clamped to [1, 20] and the domain filter truncated
    /// to 20 entries before the provider is called. A provider error aborts
    /// the whole operation; a per-result fetch error is recorded on that
    /// result only.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchBatch, SearchError> {
        if request.query.trim().is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "query cannot be empty".to_string(),
            });
        }

        let request = request.normalized();
        let start = Instant::now();

        debug!("Searching via {}: {}", self.provider.name(), request.query);
        let results = self.provider.search(&request).await?;

        let mut enriched = Vec::with_capacity(results.len());
        for result in results {
            enriched.push(self.enrich(result).await);
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "Search complete: {} results for '{}' in {}ms",
            enriched.len(),
            request.query,
            elapsed_ms
        );

        Ok(SearchBatch {
            query: request.query,
            total_results: enriched.len(),
            results: enriched,
            search_time_ms: elapsed_ms,
            provider: self.provider.name().to_string(),
        })
    }

    /// Fetch one result's page and attach extracted content
    async fn enrich(&self, result: SearchResult) -> EnrichedResult {
        let mut enriched = EnrichedResult {
            title: result.title,
            url: result.url,
            snippet: result.snippet,
            date: result.date,
            content: None,
            content_extraction_status: ContentStatus::NotAttempted,
        };

        let Some(url) = enriched.url.clone() else {
            return enriched;
        };

        match self.fetcher.fetch(&url).await {
            Ok(page) => {
                let extracted =
                    extract_main_content(&page.html, self.content_config.max_chars_search_content);
                debug!("Extracted {} chars from: {}", extracted.original_chars, url);
                enriched.content = Some(extracted.text);
                enriched.content_extraction_status = ContentStatus::Success;
            }
            Err(e) => {
                warn!("Content fetch failed for {}: {}", url, e);
                enriched.content_extraction_status = ContentStatus::Error(e.to_string());
            }
        }

        enriched
    }

    /// Fetch a single page directly and extract its main content
    ///
    /// Unlike the per-result enrichment path, fetch errors here propagate to
    /// the caller.
    pub async fn fetch_page(&self, url: &str) -> Result<PageCapture, FetchError> {
        let page = self.fetcher.fetch(url).await?;

        let extracted =
            extract_main_content(&page.html, self.content_config.max_chars_fetch_content);
        let title = extract_title(&page.html);

        info!(
            "Fetched {} chars from: {} (HTTP {})",
            extracted.original_chars, url, page.status_code
        );

        Ok(PageCapture {
            url: page.url,
            title,
            content: extracted.text,
            content_length: extracted.original_chars,
            status_code: page.status_code,
        })
    }

    /// Check whether the configured provider can serve requests
    pub fn provider_available(&self) -> bool {
        self.provider.is_available()
    }

    /// Name of the configured provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
