// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::{env, sync::Arc};

use anyhow::{bail, Result};
use clap::Parser;
use fabstir_search_mcp::{
    mcp::{serve, SearchMcpService, ServerMode},
    search::{ContentFetchConfig, SearchConfig, SearchService},
};
use tracing::warn;

/// Fabstir Search MCP server
#[derive(Parser, Debug)]
#[command(name = "fabstir-search-mcp")]
#[command(version = fabstir_search_mcp::version::VERSION_NUMBER)]
#[command(about = "Perplexity-backed web search and page extraction over MCP", long_about = None)]
struct Cli {
    /// Transport to serve: "stdio" or "http"
    #[arg(long, env = "MCP_TRANSPORT", default_value = "stdio")]
    transport: String,

    /// Port for the HTTP transport
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Bind address for the HTTP transport
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging. Logs go to stderr: the
    // stdio transport owns stdout as its protocol channel.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let search_config = SearchConfig::from_env();
    if let Err(e) = search_config.validate() {
        warn!("{}; search requests will fail until it is set", e);
    }

    let content_config = ContentFetchConfig::from_env();
    content_config.validate().map_err(anyhow::Error::msg)?;

    let service = Arc::new(SearchService::new(search_config, content_config));

    let mode = match cli.transport.as_str() {
        "stdio" => ServerMode::Stdio,
        "http" => ServerMode::Http {
            bind: cli.bind,
            port: cli.port,
        },
        other => bail!("Unknown transport '{}' (expected 'stdio' or 'http')", other),
    };

    tracing::info!(
        "Starting {} ({} transport)",
        fabstir_search_mcp::version::get_version_string(),
        cli.transport
    );

    serve(mode, SearchMcpService::new(service)).await
}
