//! HTTP transport for the RPC server.
//!
//! A single POST endpoint carries every JSON-RPC method. The reply body is
//! either the raw envelope or the same envelope framed as one
//! Server-Sent-Events message, depending on the configured framing mode;
//! the two are equivalent to a conforming client. RPC-level failures are
//! always delivered with HTTP 200; only a transport-level fault earns a
//! non-success status.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::server::McpService;
use crate::types::JsonRpcResponse;

/// Response framing mode for the RPC endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// The envelope is the response body.
    #[default]
    Json,
    /// The envelope is wrapped as a single `event: message` SSE block.
    Sse,
}

impl FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Framing::Json),
            "sse" => Ok(Framing::Sse),
            other => Err(format!("unknown framing mode '{other}'")),
        }
    }
}

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<McpService>,
    pub framing: Framing,
}

/// Build the RPC router: `POST /mcp` for the protocol, `GET /health` for
/// liveness probes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(rpc))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}

async fn rpc(State(state): State<AppState>, body: String) -> Response {
    let response = state.service.handle_raw(&body).await;
    match state.framing {
        Framing::Json => Json(response).into_response(),
        Framing::Sse => (
            [(header::CONTENT_TYPE, "text/event-stream")],
            sse_frame(&response),
        )
            .into_response(),
    }
}

/// Frame an envelope as a single SSE message.
pub fn sse_frame(response: &JsonRpcResponse) -> String {
    let json = serde_json::to_string(response).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize response envelope");
        r#"{"jsonrpc":"2.0","id":0,"error":{"code":-32603,"message":"serialization failure"}}"#
            .to_string()
    });
    format!("event: message\ndata: {json}\n\n")
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    name: String,
    version: String,
    tools: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: state.service.name().to_string(),
        version: state.service.version().to_string(),
        tools: state.service.tool_count(),
    })
}
