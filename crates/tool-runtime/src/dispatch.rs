//! Schema-driven argument marshalling and tool invocation.
//!
//! The dispatcher sits between the RPC layer and the handlers: it resolves
//! the tool, coerces the loosely-typed argument bag against the declared
//! schema, invokes the handler, and wraps the text result as a content
//! sequence. A handler failure becomes a `DispatchError::Execution`; it
//! never propagates as a raw panic or crashes the server.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::registry::{RegistryError, ToolRegistry};
use crate::schema::PropertyType;
use crate::tool::ToolContent;

/// Policy for required arguments missing from the bag.
///
/// The protocol tolerates sloppy callers: handlers are written to degrade
/// (empty lookups, zero defaults) when arguments are absent, so the default
/// lets them. Strict mode rejects the call before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentPolicy {
    #[default]
    Lenient,
    Strict,
}

/// Validates and routes tool calls against a read-only registry.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    policy: ArgumentPolicy,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            policy: ArgumentPolicy::default(),
        }
    }

    /// Set the required-argument policy.
    pub fn with_policy(mut self, policy: ArgumentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a call by tool name with a raw argument bag.
    ///
    /// On success the handler's text is wrapped as a single-element content
    /// sequence. Unknown tools propagate unchanged so the RPC layer can map
    /// them to the proper error code.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<Vec<ToolContent>, DispatchError> {
        let tool = self.registry.resolve(name).map_err(|e| match e {
            RegistryError::UnknownTool(n) => DispatchError::UnknownTool(n),
            other => DispatchError::Execution {
                tool: name.to_string(),
                message: other.to_string(),
            },
        })?;

        let descriptor = tool.descriptor();
        let schema = &descriptor.input_schema;

        let mut bag = match arguments {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(DispatchError::ArgumentType {
                    tool: name.to_string(),
                    argument: "arguments".to_string(),
                    expected: "object",
                    found: json_type_name(&other),
                })
            }
        };

        if self.policy == ArgumentPolicy::Strict {
            for required in &schema.required {
                if !bag.contains_key(required) {
                    return Err(DispatchError::MissingArgument {
                        tool: name.to_string(),
                        argument: required.clone(),
                    });
                }
            }
        }

        // Coerce declared arguments; undeclared keys pass through untouched.
        for (key, prop) in &schema.properties {
            if let Some(value) = bag.get(key) {
                let coerced =
                    coerce(value, prop.value_type).map_err(|found| DispatchError::ArgumentType {
                        tool: name.to_string(),
                        argument: key.clone(),
                        expected: prop.value_type.as_str(),
                        found,
                    })?;
                bag.insert(key.clone(), coerced);
            }
        }

        let bag = Value::Object(bag);
        debug!(tool = %name, arguments = %bag, "Dispatching tool call");

        match tool.call(bag).await {
            Ok(text) => {
                debug!(tool = %name, "Tool call succeeded");
                Ok(vec![ToolContent::Text { text }])
            }
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool call failed");
                Err(DispatchError::Execution {
                    tool: name.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Coerce a single value to the declared parameter type.
///
/// Numbers accept JSON numbers and numeric strings; strings accept JSON
/// strings and stringify scalars. Returns the found type name on failure.
fn coerce(value: &Value, expected: PropertyType) -> Result<Value, &'static str> {
    match expected {
        PropertyType::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or("string"),
            other => Err(json_type_name(other)),
        },
        PropertyType::String => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            other => Err(json_type_name(other)),
        },
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid argument '{argument}' for tool '{tool}': expected {expected}, got {found}")]
    ArgumentType {
        tool: String,
        argument: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Missing required argument '{argument}' for tool '{tool}'")]
    MissingArgument { tool: String, argument: String },

    #[error("Tool '{tool}' failed: {message}")]
    Execution { tool: String, message: String },
}
