// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchRequest, SearchResult};

/// Trait for implementing search providers
///
/// The orchestrator talks to the provider only through this trait, so tests
/// can substitute a mock without touching the network.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `request` - Normalized search parameters (result count already
    ///   clamped, domain filter already truncated)
    ///
    /// # Returns
    /// The provider's ranked results, or an error
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is usable (has an API key, etc.)
    fn is_available(&self) -> bool;
}
