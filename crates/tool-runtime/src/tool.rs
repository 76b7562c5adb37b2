use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{PropertyType, SchemaObject, ToolDescriptor};

/// A typed unit of tool output. Handlers return plain text; the dispatcher
/// wraps it as a single-element content sequence for the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        ToolContent::Text { text: text.into() }
    }
}

/// The primary extension point: all tools implement this trait.
///
/// Tools are object-safe, Send + Sync, and stateless; a handler may be
/// invoked concurrently with different argument bags.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's descriptor (name, description, input schema).
    fn descriptor(&self) -> ToolDescriptor;

    /// Execute the tool with an already-coerced argument bag, producing the
    /// textual payload of the result.
    async fn call(&self, arguments: Value) -> Result<String, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Simple echo tool for testing purposes.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "echo".to_string(),
            description: "Echoes back the input message. For testing.".to_string(),
            input_schema: SchemaObject::object()
                .property("message", PropertyType::String, "The message to echo back")
                .require("message"),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let message = arguments
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidInput("missing 'message' field".to_string()))?;
        Ok(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_content_wire_shape() {
        let content = ToolContent::text("hello");
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hello");
    }

    #[tokio::test]
    async fn test_echo_tool() {
        let tool = EchoTool;
        let desc = tool.descriptor();
        assert_eq!(desc.name, "echo");

        let result = tool
            .call(serde_json::json!({"message": "hello world"}))
            .await
            .unwrap();
        assert_eq!(result, "hello world");
    }

    #[tokio::test]
    async fn test_echo_tool_missing_message() {
        let tool = EchoTool;
        let err = tool.call(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
