// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Perplexity provider tests against a local mock API server
//!
//! These tests verify that:
//! - The provider sends Bearer auth and the expected JSON payload
//! - Optional country/domain-filter fields are forwarded when present
//! - Results deserialize with missing optional fields
//! - HTTP 429 maps to RateLimited, 401/403 to NoApiKey, 5xx to ApiError

use fabstir_search_mcp::search::{
    PerplexitySearchProvider, SearchError, SearchProvider, SearchRequest,
};
use mockito::Matcher;
use serde_json::json;

fn provider_for(server: &mockito::ServerGuard) -> PerplexitySearchProvider {
    PerplexitySearchProvider::with_api_url("pplx-test-key", server.url())
}

#[tokio::test]
async fn test_search_sends_auth_and_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", "Bearer pplx-test-key")
        .match_body(Matcher::PartialJson(json!({
            "query": "rust async runtimes",
            "max_results": 5,
            "max_tokens_per_page": 1024
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [
                    {
                        "title": "Tokio",
                        "url": "https://tokio.rs",
                        "snippet": "An asynchronous runtime",
                        "date": "2025-01-05"
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let request = SearchRequest::new("rust async runtimes");
    let results = provider.search(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title.as_deref(), Some("Tokio"));
    assert_eq!(results[0].url.as_deref(), Some("https://tokio.rs"));
}

#[tokio::test]
async fn test_search_forwards_country_and_domain_filter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "country": "GB",
            "search_domain_filter": ["bbc.co.uk"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "results": [] }).to_string())
        .create_async()
        .await;

    let provider = provider_for(&server);
    let mut request = SearchRequest::new("news");
    request.country = Some("GB".to_string());
    request.domain_filter = Some(vec!["bbc.co.uk".to_string()]);

    let results = provider.search(&request).await.unwrap();
    mock.assert_async().await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_tolerates_missing_result_fields() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "results": [{ "snippet": "only a snippet" }] }).to_string())
        .create_async()
        .await;

    let provider = provider_for(&server);
    let results = provider
        .search(&SearchRequest::new("anything"))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].title.is_none());
    assert!(results[0].url.is_none());
    assert_eq!(results[0].snippet.as_deref(), Some("only a snippet"));
}

#[tokio::test]
async fn test_search_rate_limited() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(429)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.search(&SearchRequest::new("test")).await;
    assert!(matches!(result, Err(SearchError::RateLimited { .. })));
}

#[tokio::test]
async fn test_search_unauthorized_maps_to_no_api_key() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(401)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.search(&SearchRequest::new("test")).await;
    assert!(matches!(result, Err(SearchError::NoApiKey { provider }) if provider == "perplexity"));
}

#[tokio::test]
async fn test_search_server_error_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.search(&SearchRequest::new("test")).await;
    match result {
        Err(SearchError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("Expected ApiError, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_search_malformed_json_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.search(&SearchRequest::new("test")).await;
    assert!(
        matches!(result, Err(SearchError::ApiError { message, .. }) if message.contains("JSON"))
    );
}
