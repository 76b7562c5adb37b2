//! Readmission risk score tool.

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{PropertyType, SchemaObject, ToolDescriptor};
use crate::tool::{Tool, ToolError};

/// Computes `age * 0.2 + comorbidityCount * 5` and buckets it into a
/// low/medium/high category. Missing arguments degrade to zero rather than
/// failing, matching the lenient dispatch policy.
pub struct RiskScoreTool;

#[async_trait]
impl Tool for RiskScoreTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "calculate_risk_score".to_string(),
            description:
                "Calculate a readmission risk score and category from age and comorbidity count."
                    .to_string(),
            input_schema: SchemaObject::object()
                .property("age", PropertyType::Number, "Patient age in years")
                .property(
                    "comorbidityCount",
                    PropertyType::Number,
                    "Number of known comorbidities",
                )
                .require("age")
                .require("comorbidityCount"),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let age = arguments.get("age").and_then(Value::as_f64).unwrap_or(0.0);
        let comorbidities = arguments
            .get("comorbidityCount")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        let score = age * 0.2 + comorbidities * 5.0;
        // Boundary values fall to the lower category: comparison is strict.
        let category = if score > 60.0 {
            "high"
        } else if score > 30.0 {
            "medium"
        } else {
            "low"
        };

        let result = serde_json::json!({ "score": score, "category": category });
        serde_json::to_string(&result)
            .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization failed: {e}")))
    }
}
