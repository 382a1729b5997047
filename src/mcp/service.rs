// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! MCP tool service
//!
//! Exposes the `search` and `fetch` tools over the Model Context Protocol.
//! Operational failures surface as result envelopes with `status: "error"`,
//! never as protocol errors; protocol errors are reserved for malformed
//! arguments.

use std::sync::Arc;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::*,
    tool, tool_router,
    ErrorData as McpError,
};
use serde::{Deserialize, Serialize};

use crate::search::{
    EnrichedResult, PageCapture, SearchBatch, SearchRequest, SearchService, DEFAULT_MAX_RESULTS,
    DEFAULT_MAX_TOKENS_PER_PAGE,
};

/// Parameters for the `search` tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchToolParams {
    /// Search query string
    pub query: String,
    /// Number of results to return (1-20, default 5)
    pub max_results: Option<usize>,
    /// Content extraction budget per page, forwarded to the search API
    /// (default 1024)
    pub max_tokens_per_page: Option<usize>,
    /// ISO 3166-1 alpha-2 country code (e.g. "US", "GB")
    pub country: Option<String>,
    /// Domains to restrict results to (max 20)
    pub domain_filter: Option<Vec<String>>,
}

/// Parameters for the `fetch` tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FetchToolParams {
    /// URL of the webpage to fetch
    pub url: String,
}

/// Result envelope for the `search` tool
#[derive(Debug, Serialize)]
pub struct SearchEnvelope {
    pub status: &'static str,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<EnrichedResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    pub fn success(batch: SearchBatch) -> Self {
        Self {
            status: "success",
            query: batch.query,
            total_results: Some(batch.total_results),
            results: Some(batch.results),
            error: None,
        }
    }

    pub fn error(query: String, message: String) -> Self {
        Self {
            status: "error",
            query,
            results: None,
            total_results: None,
            error: Some(message),
        }
    }
}

/// Result envelope for the `fetch` tool
#[derive(Debug, Serialize)]
pub struct FetchEnvelope {
    pub status: &'static str,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchEnvelope {
    pub fn success(capture: PageCapture) -> Self {
        Self {
            status: "success",
            url: capture.url,
            title: capture.title,
            content: Some(capture.content),
            content_length: Some(capture.content_length),
            status_code: Some(capture.status_code),
            error: None,
        }
    }

    pub fn error(url: String, message: String) -> Self {
        Self {
            status: "error",
            url,
            title: None,
            content: None,
            content_length: None,
            status_code: None,
            error: Some(message),
        }
    }
}

/// MCP service exposing the search and fetch tools
#[derive(Clone)]
pub struct SearchMcpService {
    service: Arc<SearchService>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SearchMcpService {
    /// Create a new MCP service wrapping a search service
    pub fn new(service: Arc<SearchService>) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the web using the Perplexity Search API. Returns ranked search results with URLs, titles, snippets, and extracted page content."
    )]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = SearchRequest {
            query: params.query.clone(),
            max_results: params.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            max_tokens_per_page: params
                .max_tokens_per_page
                .unwrap_or(DEFAULT_MAX_TOKENS_PER_PAGE),
            country: params.country,
            domain_filter: params.domain_filter,
        };

        let envelope = match self.service.search(request).await {
            Ok(batch) => SearchEnvelope::success(batch),
            Err(e) => SearchEnvelope::error(params.query, e.to_string()),
        };

        to_tool_result(&envelope)
    }

    #[tool(description = "Fetch and extract main content from a webpage URL")]
    async fn fetch(
        &self,
        Parameters(params): Parameters<FetchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = match self.service.fetch_page(&params.url).await {
            Ok(capture) => FetchEnvelope::success(capture),
            Err(e) => FetchEnvelope::error(params.url, e.to_string()),
        };

        to_tool_result(&envelope)
    }
}

fn to_tool_result<T: Serialize>(envelope: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(envelope).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize response: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

impl ServerHandler for SearchMcpService {
    fn get_info(&self) -> ServerInfo {
        let mut server_info =
            Implementation::new("fabstir-search-mcp", crate::version::VERSION_NUMBER);
        server_info.title = Some("Fabstir Search MCP Server".into());
        server_info.icons = None;
        server_info.website_url = None;

        let mut info = ServerInfo::new(ServerCapabilities::builder().enable_tools().build());
        info.protocol_version = ProtocolVersion::default();
        info.server_info = server_info;
        info.instructions = Some(
            "Web search backed by the Perplexity Search API. Use the search tool for \
             ranked results with extracted page content, and the fetch tool to pull the \
             main content of a specific URL."
                .into(),
        );
        info
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        use rmcp::handler::server::tool::ToolCallContext;
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            ..Default::default()
        })
    }
}
