// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Search orchestration tests with scripted provider and fetcher
//!
//! These tests verify that:
//! - A batch with one failing URL still returns all N results, with exactly
//!   one error status and the rest successful
//! - Requested result counts of 0 and 50 reach the provider as 1 and 20
//! - Results without a URL are reported `not_attempted`
//! - Enriched content respects the 2000-char search cap
//! - The direct fetch path respects the 5000-char cap and reports the
//!   pre-truncation length
//! - Provider errors abort the whole search

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fabstir_search_mcp::search::{
    ContentFetchConfig, ContentStatus, FetchError, FetchedPage, PageFetcher, SearchError,
    SearchProvider, SearchRequest, SearchResult, SearchService,
};

/// Provider returning a fixed result list and recording the request it saw
struct ScriptedProvider {
    results: Vec<SearchResult>,
    seen_max_results: Arc<Mutex<Option<usize>>>,
}

impl ScriptedProvider {
    fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            seen_max_results: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        *self.seen_max_results.lock().unwrap() = Some(request.max_results);
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Provider that always fails
struct FailingProvider;

#[async_trait]
impl SearchProvider for FailingProvider {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::ApiError {
            status: 502,
            message: "bad gateway".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Fetcher that fails for URLs containing "fail" and serves a fixed page
/// otherwise
struct ScriptedFetcher {
    page_body: String,
}

impl ScriptedFetcher {
    fn new(page_body: impl Into<String>) -> Self {
        Self {
            page_body: page_body.into(),
        }
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if url.contains("fail") {
            return Err(FetchError::HttpStatus(500, url.to_string()));
        }
        Ok(FetchedPage {
            url: url.to_string(),
            status_code: 200,
            html: format!(
                "<html><head><title>Stub Page</title></head><body><main>{}</main></body></html>",
                self.page_body
            ),
        })
    }
}

fn result_with_url(url: Option<&str>) -> SearchResult {
    SearchResult {
        title: Some("A result".to_string()),
        url: url.map(String::from),
        snippet: Some("snippet".to_string()),
        date: None,
    }
}

fn service_with(
    provider: impl SearchProvider + 'static,
    fetcher: impl PageFetcher + 'static,
) -> SearchService {
    SearchService::with_components(
        Box::new(provider),
        Arc::new(fetcher),
        ContentFetchConfig::default(),
    )
}

#[tokio::test]
async fn test_one_failing_url_does_not_abort_batch() {
    let provider = ScriptedProvider::new(vec![
        result_with_url(Some("https://ok-one.example/page")),
        result_with_url(Some("https://fail.example/page")),
        result_with_url(Some("https://ok-two.example/page")),
    ]);
    let service = service_with(provider, ScriptedFetcher::new("Readable page text"));

    let batch = service.search(SearchRequest::new("herons")).await.unwrap();

    assert_eq!(batch.total_results, 3);
    assert_eq!(batch.results.len(), 3);

    let statuses: Vec<_> = batch
        .results
        .iter()
        .map(|r| r.content_extraction_status.clone())
        .collect();
    assert_eq!(statuses[0], ContentStatus::Success);
    assert!(matches!(statuses[1], ContentStatus::Error(_)));
    assert_eq!(statuses[2], ContentStatus::Success);

    // The failed result carries no content; the others do
    assert!(batch.results[1].content.is_none());
    assert!(batch.results[0].content.is_some());

    // Error status serializes with the "error: " prefix
    let json = serde_json::to_value(&batch.results[1]).unwrap();
    assert!(json["content_extraction_status"]
        .as_str()
        .unwrap()
        .starts_with("error: "));
}

#[tokio::test]
async fn test_all_urls_failing_still_returns_all_results() {
    let provider = ScriptedProvider::new(vec![
        result_with_url(Some("https://fail.example/a")),
        result_with_url(Some("https://fail.example/b")),
    ]);
    let service = service_with(provider, ScriptedFetcher::new("unused"));

    let batch = service.search(SearchRequest::new("query")).await.unwrap();
    assert_eq!(batch.total_results, 2);
    assert!(batch
        .results
        .iter()
        .all(|r| matches!(r.content_extraction_status, ContentStatus::Error(_))));
}

#[tokio::test]
async fn test_max_results_zero_clamped_to_one() {
    let provider = ScriptedProvider::new(vec![]);
    let seen = provider.seen_max_results.clone();
    let service = service_with(provider, ScriptedFetcher::new("unused"));

    let mut request = SearchRequest::new("query");
    request.max_results = 0;
    service.search(request).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), Some(1));
}

#[tokio::test]
async fn test_max_results_fifty_clamped_to_twenty() {
    let provider = ScriptedProvider::new(vec![]);
    let seen = provider.seen_max_results.clone();
    let service = service_with(provider, ScriptedFetcher::new("unused"));

    let mut request = SearchRequest::new("query");
    request.max_results = 50;
    service.search(request).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), Some(20));
}

#[tokio::test]
async fn test_result_without_url_is_not_attempted() {
    let provider = ScriptedProvider::new(vec![
        result_with_url(None),
        result_with_url(Some("https://ok.example/page")),
    ]);
    let service = service_with(provider, ScriptedFetcher::new("Readable page text"));

    let batch = service.search(SearchRequest::new("query")).await.unwrap();
    assert_eq!(
        batch.results[0].content_extraction_status,
        ContentStatus::NotAttempted
    );
    assert!(batch.results[0].content.is_none());
    assert_eq!(
        batch.results[1].content_extraction_status,
        ContentStatus::Success
    );
}

#[tokio::test]
async fn test_enriched_content_respects_search_cap() {
    let long_body = "patient hunting strategy ".repeat(500);
    let provider = ScriptedProvider::new(vec![result_with_url(Some("https://ok.example/long"))]);
    let service = service_with(provider, ScriptedFetcher::new(long_body));

    let batch = service.search(SearchRequest::new("query")).await.unwrap();
    let content = batch.results[0].content.as_ref().unwrap();
    assert!(content.chars().count() <= 2000);
}

#[tokio::test]
async fn test_provider_error_aborts_search() {
    let service = service_with(FailingProvider, ScriptedFetcher::new("unused"));

    let result = service.search(SearchRequest::new("query")).await;
    assert!(
        matches!(result, Err(SearchError::ApiError { status, .. }) if status == 502)
    );
}

#[tokio::test]
async fn test_fetch_page_caps_content_and_reports_length() {
    let long_body = "word ".repeat(3000);
    let service = service_with(
        ScriptedProvider::new(vec![]),
        ScriptedFetcher::new(long_body),
    );

    let capture = service
        .fetch_page("https://ok.example/article")
        .await
        .unwrap();

    assert!(capture.content.chars().count() <= 5000);
    assert!(capture.content_length > 5000);
    assert_eq!(capture.status_code, 200);
    assert_eq!(capture.title.as_deref(), Some("Stub Page"));
}

#[tokio::test]
async fn test_fetch_page_error_propagates() {
    let service = service_with(
        ScriptedProvider::new(vec![]),
        ScriptedFetcher::new("unused"),
    );

    let result = service.fetch_page("https://fail.example/page").await;
    assert!(matches!(result, Err(FetchError::HttpStatus(500, _))));
}
