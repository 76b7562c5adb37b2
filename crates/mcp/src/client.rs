//! MCP client implementation.
//!
//! Issues JSON-RPC requests over HTTP POST with monotonically increasing
//! correlation ids, tolerates either response framing (raw JSON or a
//! single SSE-wrapped message), and normalizes failures into `McpError`.
//! There is no automatic retry: transport and RPC errors surface to the
//! caller unchanged.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use reqwest::header;
use serde_json::Value;

use triage_tool_runtime::ToolDescriptor;

use crate::error::McpError;
use crate::types::*;

/// An MCP client bound to a single server endpoint.
///
/// The correlation-id counter is the only mutable state and is atomic, so
/// one client instance may be shared across tasks; each logical call is a
/// complete request/response cycle, so no pending-call table is needed.
pub struct McpClient {
    endpoint: String,
    http: reqwest::Client,
    next_id: AtomicI64,
    timeout: Option<Duration>,
}

impl McpClient {
    /// Create a client for the given RPC endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
            next_id: AtomicI64::new(0),
            timeout: None,
        }
    }

    /// Set a per-call deadline. Expiry fails the call with
    /// `McpError::Timeout`, distinguishable from an HTTP-status failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Next correlation id: pre-incremented, so the first id sent is 1.
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Send a JSON-RPC request and return the `result` payload.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        let id = self.next_id();
        let request = JsonRpcRequest::new(id, method, params);

        tracing::debug!(method = %method, id = id, "Sending request");

        let mut builder = self
            .http
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json, text/event-stream")
            .json(&request);
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(McpError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let payload = unframe(&body)?;
        let envelope: JsonRpcResponse = serde_json::from_str(payload)?;

        if let Some(err) = envelope.error {
            return Err(McpError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| McpError::MalformedResponse("missing result".to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> McpError {
        if error.is_timeout() {
            if let Some(t) = self.timeout {
                return McpError::Timeout(t);
            }
        }
        McpError::Http(error)
    }

    // ── Protocol operations ─────────────────────────────────────────

    /// Perform the MCP initialization handshake.
    pub async fn initialize(&self) -> Result<InitializeResult, McpError> {
        let params = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": "triage-client",
                "version": env!("CARGO_PKG_VERSION")
            }
        });

        let result = self.call("initialize", Some(params)).await?;
        let parsed: InitializeResult = serde_json::from_value(result)?;
        tracing::info!(server = %parsed.server_info.name, "MCP client initialized");
        Ok(parsed)
    }

    /// Discover the server's tools, in the server's advertised order.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpError> {
        let result = self.call("tools/list", None).await?;
        let parsed: ListToolsResult = serde_json::from_value(result)?;
        tracing::debug!(count = parsed.tools.len(), "Tool discovery complete");
        Ok(parsed.tools)
    }

    /// Invoke a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        let params = serde_json::json!({
            "name": name,
            "arguments": arguments,
        });

        let result = self.call("tools/call", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }
}

/// Extract the JSON payload from a response body that may be SSE-framed.
///
/// Framing is detected from the first bytes rather than assumed: a body
/// opening with an SSE field yields the first `data: ` line's payload, any
/// other body is returned whole.
fn unframe(body: &str) -> Result<&str, McpError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with("event:") || trimmed.starts_with("data:") {
        return trimmed
            .lines()
            .find_map(|line| line.strip_prefix("data:"))
            .map(str::trim)
            .ok_or_else(|| {
                McpError::MalformedResponse("SSE body without a data line".to_string())
            });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_ids_start_at_one_and_increase() {
        let client = McpClient::new("http://localhost:0/mcp");
        assert_eq!(client.next_id(), 1);
        assert_eq!(client.next_id(), 2);
        assert_eq!(client.next_id(), 3);
    }

    #[test]
    fn test_unframe_plain_json() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
        assert_eq!(unframe(body).unwrap(), body);
    }

    #[test]
    fn test_unframe_sse_body() {
        let body = "event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}\n\n";
        assert_eq!(
            unframe(body).unwrap(),
            r#"{"jsonrpc":"2.0","id":1,"result":{}}"#
        );
    }

    #[test]
    fn test_unframe_sse_and_plain_decode_identically() {
        let envelope = JsonRpcResponse::success(4, serde_json::json!({"tools": []}));
        let plain = serde_json::to_string(&envelope).unwrap();
        let framed = crate::http::sse_frame(&envelope);

        let from_plain: JsonRpcResponse = serde_json::from_str(unframe(&plain).unwrap()).unwrap();
        let from_sse: JsonRpcResponse = serde_json::from_str(unframe(&framed).unwrap()).unwrap();
        assert_eq!(from_plain, from_sse);
    }

    #[test]
    fn test_unframe_rejects_sse_without_data() {
        let body = "event: message\n\n";
        assert!(matches!(
            unframe(body),
            Err(McpError::MalformedResponse(_))
        ));
    }
}
