//! Configuration for content fetching
//!
//! Defines settings for HTTP fetching and extraction caps.

use std::env;

/// User-Agent sent with page fetches
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration for content fetching
#[derive(Debug, Clone)]
pub struct ContentFetchConfig {
    /// Timeout per page fetch in seconds (default: 10)
    pub fetch_timeout_secs: u64,
    /// Character cap for content attached to search results (default: 2000)
    pub max_chars_search_content: usize,
    /// Character cap for directly fetched pages (default: 5000)
    pub max_chars_fetch_content: usize,
    /// User-Agent header for page fetches
    pub user_agent: String,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            fetch_timeout_secs: env::var("CONTENT_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_chars_search_content: env::var("SEARCH_CONTENT_MAX_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            max_chars_fetch_content: env::var("FETCH_CONTENT_MAX_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            user_agent: env::var("CONTENT_FETCH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be at least 1".to_string());
        }
        if self.max_chars_search_content < 100 {
            return Err("max_chars_search_content must be at least 100".to_string());
        }
        if self.max_chars_fetch_content < 100 {
            return Err("max_chars_fetch_content must be at least 100".to_string());
        }
        Ok(())
    }
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            max_chars_search_content: 2000,
            max_chars_fetch_content: 5000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
