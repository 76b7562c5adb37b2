//! MCP (Model Context Protocol) implementation for triage.
//!
//! This crate implements the MCP protocol over JSON-RPC 2.0 and HTTP,
//! letting a language-model client discover and invoke the tools a server
//! exposes.
//!
//! # Architecture
//!
//! - **types**: JSON-RPC 2.0 and MCP-specific protocol types
//! - **server**: method routing against a read-only `ToolRegistry`
//! - **http**: axum transport with plain-JSON or SSE response framing
//! - **client**: HTTP client with correlation ids and framing detection
//! - **proxy**: locally callable wrappers around discovered tools
//! - **error**: unified error types
//!
//! # Usage
//!
//! ## Server
//! ```no_run
//! use std::sync::Arc;
//! use triage_mcp::http::{build_router, AppState, Framing};
//! use triage_mcp::server::McpService;
//! use triage_tool_runtime::ToolRegistry;
//!
//! let registry = ToolRegistry::new();
//! let state = AppState {
//!     service: Arc::new(McpService::new(Arc::new(registry))),
//!     framing: Framing::Json,
//! };
//! let app = build_router(state);
//! ```
//!
//! ## Client
//! ```no_run
//! use triage_mcp::client::McpClient;
//!
//! # async fn example() -> Result<(), triage_mcp::McpError> {
//! let client = McpClient::new("http://127.0.0.1:3001/mcp");
//! client.initialize().await?;
//! let tools = client.list_tools().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod proxy;
pub mod server;
pub mod types;

pub use client::McpClient;
pub use error::McpError;
pub use http::{build_router, AppState, Framing};
pub use proxy::ToolProxy;
pub use server::McpService;
pub use types::*;
