// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod mcp;
pub mod search;
pub mod version;

// Re-export main types
pub use mcp::{serve, SearchMcpService, ServerMode};
pub use search::{
    ContentFetchConfig, ContentStatus, EnrichedResult, PageCapture, SearchBatch, SearchConfig,
    SearchError, SearchRequest, SearchResult, SearchService,
};
