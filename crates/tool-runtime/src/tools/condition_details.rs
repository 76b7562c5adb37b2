//! Condition dictionary lookup tool.

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{PropertyType, SchemaObject, ToolDescriptor};
use crate::tool::{Tool, ToolError};
use crate::tools::dataset;

/// Looks up a condition's description and severity in the dictionary.
/// Matching is case-insensitive; unknown names degrade to a structured
/// "no details found" payload.
pub struct ConditionDetailsTool;

#[async_trait]
impl Tool for ConditionDetailsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_condition_details".to_string(),
            description: "Look up the description and severity of a health condition by name."
                .to_string(),
            input_schema: SchemaObject::object()
                .property(
                    "conditionName",
                    PropertyType::String,
                    "Name of the condition to look up",
                )
                .require("conditionName"),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let name = arguments
            .get("conditionName")
            .and_then(Value::as_str)
            .unwrap_or("");

        let result = match dataset::find_condition(name) {
            Some(condition) => serde_json::json!({
                "name": condition.name,
                "description": condition.description,
                "severity": condition.severity,
            }),
            None => serde_json::json!({
                "conditionName": name,
                "message": format!("No details found for condition '{name}'"),
            }),
        };

        serde_json::to_string(&result)
            .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization failed: {e}")))
    }
}
