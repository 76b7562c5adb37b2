//! Patient condition lookup tool.

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{PropertyType, SchemaObject, ToolDescriptor};
use crate::tool::{Tool, ToolError};
use crate::tools::dataset;

/// Looks up a patient's known conditions by id. An unknown or absent id
/// produces a structured "no conditions found" payload, never an error.
pub struct PatientConditionsTool;

#[async_trait]
impl Tool for PatientConditionsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_patient_health_conditions".to_string(),
            description: "Look up the known health conditions for a patient by id.".to_string(),
            input_schema: SchemaObject::object()
                .property("patientId", PropertyType::String, "Patient identifier")
                .require("patientId"),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let patient_id = arguments
            .get("patientId")
            .and_then(Value::as_str)
            .unwrap_or("");

        let result = match dataset::find_patient(patient_id) {
            Some(patient) if !patient.conditions.is_empty() => serde_json::json!({
                "patientId": patient.id,
                "patientName": patient.name,
                "conditions": patient.conditions,
            }),
            _ => serde_json::json!({
                "patientId": patient_id,
                "conditions": [],
                "message": format!("No conditions found for patient '{patient_id}'"),
            }),
        };

        serde_json::to_string(&result)
            .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization failed: {e}")))
    }
}
