// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unified MCP server startup supporting multiple transport modes
//!
//! One service implementation serves both transports; the mode is an
//! external configuration choice, not a separate code path per transport.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::service::SearchMcpService;

/// MCP server transport mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMode {
    /// Standard input/output transport
    Stdio,
    /// Streamable HTTP transport on the given address
    Http { bind: String, port: u16 },
}

/// Health check endpoint handler
async fn health_check() -> axum::response::Json<serde_json::Value> {
    axum::response::Json(serde_json::json!({
        "status": "healthy",
        "service": "fabstir-search-mcp"
    }))
}

/// Serve the MCP service over the selected transport
///
/// Blocks until the client disconnects (stdio) or the process receives
/// ctrl-c (http).
pub async fn serve(mode: ServerMode, service: SearchMcpService) -> Result<()> {
    match mode {
        ServerMode::Stdio => serve_stdio(service).await,
        ServerMode::Http { bind, port } => serve_http(service, &bind, port).await,
    }
}

async fn serve_stdio(service: SearchMcpService) -> Result<()> {
    info!("Starting MCP server in stdio mode");

    let running = serve_server(service, stdio())
        .await
        .context("Failed to start stdio server")?;

    let quit_reason = running.waiting().await?;
    info!("MCP stdio server completed: {:?}", quit_reason);

    Ok(())
}

async fn serve_http(service: SearchMcpService, bind: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let http_service = StreamableHttpService::new(
        move || Ok(service.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let app = axum::Router::new()
        .nest_service("/mcp", http_service)
        .route("/health", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
