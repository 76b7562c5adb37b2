//! MCP server request handling.
//!
//! Wraps a `Dispatcher` and exposes its registry over the MCP protocol.
//! Stateless across requests: every inbound envelope is handled
//! independently, so concurrent calls never contend on shared mutable
//! state. The HTTP layer (`http` module) owns framing; this module owns
//! method routing and error-shape normalization.

use std::sync::Arc;

use serde_json::Value;

use triage_tool_runtime::{Dispatcher, ToolRegistry};

use crate::error::McpError;
use crate::types::*;

/// Handles JSON-RPC requests against a read-only tool registry.
pub struct McpService {
    dispatcher: Dispatcher,
    server_name: String,
    server_version: String,
}

impl McpService {
    /// Create a service with the default argument policy.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self::with_dispatcher(Dispatcher::new(registry))
    }

    /// Create a service around a pre-configured dispatcher.
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            server_name: "triage-mcp".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Set the advertised server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.server_name
    }

    pub fn version(&self) -> &str {
        &self.server_version
    }

    pub fn tool_count(&self) -> usize {
        self.dispatcher.registry().len()
    }

    /// Handle a raw request body and produce a response envelope.
    ///
    /// A body that is not JSON gets a `-32700` envelope; valid JSON that is
    /// not a JSON-RPC request gets `-32600`. RPC-level failures always come
    /// back as error envelopes, never as faults.
    pub async fn handle_raw(&self, body: &str) -> JsonRpcResponse {
        let raw: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse request body");
                let err = McpError::JsonParse(e);
                return JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: 0,
                    result: None,
                    error: Some(err.to_rpc_error()),
                };
            }
        };

        // Recover the id for the error envelope even when the request
        // itself does not deserialize.
        let fallback_id = raw.get("id").and_then(Value::as_i64).unwrap_or(0);

        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse JSON-RPC request");
                let err = McpError::InvalidRequest(e.to_string());
                return JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: fallback_id,
                    result: None,
                    error: Some(err.to_rpc_error()),
                };
            }
        };

        self.handle_request(&request).await
    }

    /// Handle a single JSON-RPC request and produce a response.
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id;

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, &request.params).await,
            method => {
                tracing::warn!(method = %method, "Unknown method");
                error_response(id, &McpError::MethodNotFound)
            }
        }
    }

    fn handle_initialize(&self, id: i64) -> JsonRpcResponse {
        tracing::info!("Handling initialize");

        // The handshake ignores whatever params the client sent; the
        // protocol version is fixed.
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        };

        success_response(id, &result)
    }

    fn handle_list_tools(&self, id: i64) -> JsonRpcResponse {
        tracing::debug!("Handling tools/list");

        let result = ListToolsResult {
            tools: self.dispatcher.registry().list(),
        };
        success_response(id, &result)
    }

    async fn handle_call_tool(&self, id: i64, params: &Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => {
                return error_response(id, &McpError::InvalidParams("missing params".to_string()))
            }
        };

        let call_params: CallToolParams = match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => return error_response(id, &McpError::InvalidParams(e.to_string())),
        };

        tracing::debug!(tool = %call_params.name, "Handling tools/call");

        match self
            .dispatcher
            .dispatch(&call_params.name, call_params.arguments)
            .await
        {
            Ok(content) => success_response(
                id,
                &CallToolResult {
                    content,
                    is_error: false,
                },
            ),
            Err(e) => error_response(id, &McpError::Dispatch(e)),
        }
    }
}

fn success_response<T: serde::Serialize>(id: i64, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(val) => JsonRpcResponse::success(id, val),
        Err(e) => error_response(id, &McpError::JsonParse(e)),
    }
}

fn error_response(id: i64, error: &McpError) -> JsonRpcResponse {
    let rpc = error.to_rpc_error();
    JsonRpcResponse::error(id, rpc.code, rpc.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_tool_runtime::{ArgumentPolicy, EchoTool, RiskScoreTool, ToolContent};

    fn test_service() -> McpService {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool).unwrap();
        registry.register(RiskScoreTool).unwrap();
        McpService::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_handle_initialize() {
        let service = test_service();
        let req = JsonRpcRequest::new(
            1,
            "initialize",
            Some(serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test-client"}
            })),
        );

        let resp = service.handle_request(&req).await;
        assert!(resp.error.is_none());
        let result: InitializeResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert_eq!(result.protocol_version, PROTOCOL_VERSION);
        assert_eq!(result.server_info.name, "triage-mcp");
    }

    #[tokio::test]
    async fn test_handle_list_tools_in_registration_order() {
        let service = test_service();
        let req = JsonRpcRequest::new(2, "tools/list", None);

        let resp = service.handle_request(&req).await;
        assert!(resp.error.is_none());
        let result: ListToolsResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        let names: Vec<&str> = result.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["echo", "calculate_risk_score"]);
    }

    #[tokio::test]
    async fn test_handle_call_tool() {
        let service = test_service();
        let req = JsonRpcRequest::new(
            3,
            "tools/call",
            Some(serde_json::json!({
                "name": "echo",
                "arguments": {"message": "hello mcp"}
            })),
        );

        let resp = service.handle_request(&req).await;
        assert!(resp.error.is_none());
        assert_eq!(resp.id, 3);
        let result: CallToolResult = serde_json::from_value(resp.result.unwrap()).unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content, vec![ToolContent::text("hello mcp")]);
    }

    #[tokio::test]
    async fn test_handle_call_tool_not_found() {
        let service = test_service();
        let req = JsonRpcRequest::new(
            4,
            "tools/call",
            Some(serde_json::json!({"name": "nonexistent", "arguments": {}})),
        );

        let resp = service.handle_request(&req).await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, error_codes::METHOD_NOT_FOUND);
        assert!(err.message.contains("nonexistent"));
    }

    #[tokio::test]
    async fn test_handle_call_tool_execution_failure() {
        use async_trait::async_trait;
        use triage_tool_runtime::{SchemaObject, Tool, ToolDescriptor, ToolError};

        struct FailingTool;

        #[async_trait]
        impl Tool for FailingTool {
            fn descriptor(&self) -> ToolDescriptor {
                ToolDescriptor {
                    name: "always_fails".to_string(),
                    description: "Fails on every call. For testing.".to_string(),
                    input_schema: SchemaObject::object(),
                }
            }

            async fn call(&self, _arguments: serde_json::Value) -> Result<String, ToolError> {
                Err(ToolError::ExecutionFailed("boom".to_string()))
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(FailingTool).unwrap();
        let service = McpService::new(Arc::new(registry));

        let req = JsonRpcRequest::new(
            5,
            "tools/call",
            Some(serde_json::json!({"name": "always_fails", "arguments": {}})),
        );
        let resp = service.handle_request(&req).await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, error_codes::INTERNAL_ERROR);
        assert!(err.message.contains("boom"));
    }

    #[tokio::test]
    async fn test_handle_unknown_method() {
        let service = test_service();
        let req = JsonRpcRequest::new(6, "unknown/method", None);

        let resp = service.handle_request(&req).await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(err.message, "Method not found");
    }

    #[tokio::test]
    async fn test_handle_raw_parse_error() {
        let service = test_service();
        let resp = service.handle_raw("this is not json").await;
        assert_eq!(resp.error.unwrap().code, error_codes::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_handle_raw_invalid_request_recovers_id() {
        let service = test_service();
        // Valid JSON, has an id, but no method field.
        let resp = service.handle_raw(r#"{"jsonrpc": "2.0", "id": 9}"#).await;
        assert_eq!(resp.id, 9);
        assert_eq!(resp.error.unwrap().code, error_codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_missing_required_argument() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool).unwrap();
        let dispatcher =
            Dispatcher::new(Arc::new(registry)).with_policy(ArgumentPolicy::Strict);
        let service = McpService::with_dispatcher(dispatcher);

        let req = JsonRpcRequest::new(
            7,
            "tools/call",
            Some(serde_json::json!({"name": "echo", "arguments": {}})),
        );
        let resp = service.handle_request(&req).await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, error_codes::INTERNAL_ERROR);
        assert!(err.message.contains("message"));
    }
}
