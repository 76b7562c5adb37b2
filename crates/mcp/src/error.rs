//! Error types for the MCP crate.
//!
//! One enum covers both sides of the wire: server-side variants know how to
//! render themselves as JSON-RPC error objects, client-side variants keep
//! transport failures, per-call deadline expiry, and well-formed RPC error
//! envelopes distinguishable for the caller.

use std::time::Duration;

use triage_tool_runtime::DispatchError;

use crate::types::{error_codes, JsonRpcError};

/// Errors that can occur during MCP operations.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// Failed to parse JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The body was valid JSON but not a JSON-RPC request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested method is not supported.
    #[error("Method not found")]
    MethodNotFound,

    /// Invalid parameters for a method.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Tool resolution, argument marshalling, or handler failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// HTTP-level failure before a response body was obtained.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("Server returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The per-call deadline elapsed before a response arrived.
    #[error("Call timed out after {0:?}")]
    Timeout(Duration),

    /// The response body could not be decoded into a JSON-RPC envelope.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The server returned a well-formed error envelope.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl McpError {
    /// Convert to a JSON-RPC error object.
    ///
    /// Unknown method and unknown tool map to `-32601`; argument and
    /// execution failures map to `-32603`. The two codes are deliberately
    /// kept separate.
    pub fn to_rpc_error(&self) -> JsonRpcError {
        let code = match self {
            McpError::JsonParse(_) => error_codes::PARSE_ERROR,
            McpError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            McpError::MethodNotFound => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            McpError::Dispatch(DispatchError::UnknownTool(_)) => error_codes::METHOD_NOT_FOUND,
            _ => error_codes::INTERNAL_ERROR,
        };
        JsonRpcError {
            code,
            message: self.to_string(),
        }
    }
}
