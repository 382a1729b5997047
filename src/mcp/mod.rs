// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! MCP protocol adapter
//!
//! Thin layer binding the search service to the Model Context Protocol:
//! tool definitions and result envelopes in [`service`], transport startup
//! in [`server`].

pub mod server;
pub mod service;

pub use server::{serve, ServerMode};
pub use service::{FetchToolParams, SearchMcpService, SearchToolParams};
