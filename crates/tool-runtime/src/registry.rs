use indexmap::IndexMap;
use std::sync::Arc;

use crate::schema::ToolDescriptor;
use crate::tool::Tool;

/// Manages available tools, their schemas, and lookup.
///
/// Built once at startup and read-only afterwards; shared across request
/// handlers via `Arc` without locking. Registration order is preserved and
/// is the order advertised to clients.
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Register a tool. Fails if the name is already registered or the
    /// schema's `required` list names an undeclared property.
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<(), RegistryError> {
        let desc = tool.descriptor();
        if let Some(field) = desc.input_schema.undeclared_required() {
            return Err(RegistryError::InvalidSchema {
                tool: desc.name.clone(),
                field: field.to_string(),
            });
        }
        if self.tools.contains_key(&desc.name) {
            return Err(RegistryError::DuplicateName(desc.name));
        }
        self.tools.insert(desc.name, Arc::new(tool));
        Ok(())
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Tool>, RegistryError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))
    }

    /// All registered tool descriptors, in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Tool with name '{0}' is already registered")]
    DuplicateName(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid schema for tool '{tool}': required field '{field}' is not a declared property")]
    InvalidSchema { tool: String, field: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PropertyType, SchemaObject};
    use crate::tool::{EchoTool, ToolError};
    use async_trait::async_trait;
    use serde_json::Value;

    struct BadSchemaTool;

    #[async_trait]
    impl Tool for BadSchemaTool {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor {
                name: "bad_schema".to_string(),
                description: "Requires a property it never declares".to_string(),
                input_schema: SchemaObject::object()
                    .property("present", PropertyType::String, "Declared")
                    .require("absent"),
            }
        }

        async fn call(&self, _arguments: Value) -> Result<String, ToolError> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("echo").is_ok());
        assert!(matches!(
            registry.resolve("nonexistent"),
            Err(RegistryError::UnknownTool(_))
        ));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool).unwrap();
        assert!(matches!(
            registry.register(EchoTool),
            Err(RegistryError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let mut registry = ToolRegistry::new();
        let err = registry.register(BadSchemaTool).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSchema { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        use crate::tools::{ConditionDetailsTool, PatientConditionsTool, RiskScoreTool};

        let mut registry = ToolRegistry::new();
        registry.register(RiskScoreTool).unwrap();
        registry.register(PatientConditionsTool).unwrap();
        registry.register(ConditionDetailsTool).unwrap();
        registry.register(EchoTool).unwrap();

        let names: Vec<String> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            [
                "calculate_risk_score",
                "get_patient_health_conditions",
                "get_condition_details",
                "echo",
            ]
        );
    }
}
