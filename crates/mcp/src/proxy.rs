//! Client-side tool proxies.
//!
//! Wraps each discovered tool as a locally callable unit that forwards to
//! `tools/call` and flattens the content sequence into a single string,
//! the shape an orchestration loop expects to splice into a conversation.

use std::sync::Arc;

use serde_json::Value;

use triage_tool_runtime::{ToolContent, ToolDescriptor};

use crate::client::McpClient;
use crate::error::McpError;

/// A locally callable handle to one remote tool.
///
/// Stateless: the same proxy can be invoked repeatedly with different
/// argument bags without re-discovery.
pub struct ToolProxy {
    descriptor: ToolDescriptor,
    client: Arc<McpClient>,
}

impl ToolProxy {
    pub fn new(descriptor: ToolDescriptor, client: Arc<McpClient>) -> Self {
        Self { descriptor, client }
    }

    /// Discover the server's tools and wrap each as a proxy, preserving the
    /// advertised order.
    pub async fn discover(client: Arc<McpClient>) -> Result<Vec<ToolProxy>, McpError> {
        let tools = client.list_tools().await?;
        Ok(tools
            .into_iter()
            .map(|descriptor| ToolProxy::new(descriptor, Arc::clone(&client)))
            .collect())
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Invoke the remote tool and return the first text item's text, or the
    /// whole content sequence JSON-serialized when no text item exists.
    pub async fn invoke(&self, arguments: Value) -> Result<String, McpError> {
        let result = self
            .client
            .call_tool(&self.descriptor.name, arguments)
            .await?;

        let first_text = result.content.iter().find_map(|item| match item {
            ToolContent::Text { text } => Some(text.clone()),
        });

        match first_text {
            Some(text) => Ok(text),
            None => Ok(serde_json::to_string(&result.content)?),
        }
    }
}
