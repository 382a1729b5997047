// Version information for the Fabstir Search MCP server

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-perplexity-search-2025-11-02";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-11-02";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "perplexity-search",
    "content-extraction",
    "stdio-transport",
    "streamable-http-transport",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Search MCP {} ({})", VERSION_NUMBER, BUILD_DATE)
}
