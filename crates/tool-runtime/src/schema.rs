//! Tool descriptors and input schemas.
//!
//! Argument bags arrive as loosely-typed JSON; the schema declares the
//! expected shape so the dispatcher can coerce values before a handler
//! ever sees them. Property order is preserved so advertised schemas are
//! stable across restarts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Describes a tool's callable interface: a unique name, a human-readable
/// description, and the input schema its arguments are validated against.
///
/// Immutable after registration; the registry owns the only copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: SchemaObject,
}

/// A JSON-Schema-style object schema: named properties plus the list of
/// names that must be present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaObject {
    /// Always "object" for tool inputs.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl SchemaObject {
    /// Start an empty object schema.
    pub fn object() -> Self {
        Self {
            kind: "object".to_string(),
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }

    /// Declare a property.
    pub fn property(
        mut self,
        name: impl Into<String>,
        value_type: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        self.properties.insert(
            name.into(),
            PropertySchema {
                value_type,
                description: description.into(),
            },
        );
        self
    }

    /// Mark a declared property as required.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// First entry in `required` that is not a declared property, if any.
    /// Every required name must be a key of `properties`.
    pub fn undeclared_required(&self) -> Option<&str> {
        self.required
            .iter()
            .find(|name| !self.properties.contains_key(name.as_str()))
            .map(String::as_str)
    }
}

/// Schema for a single named parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub value_type: PropertyType,
    pub description: String,
}

/// Parameter value types supported by the dispatcher's coercion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Number,
    String,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Number => "number",
            PropertyType::String => "string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let desc = ToolDescriptor {
            name: "echo".to_string(),
            description: "Echo tool".to_string(),
            input_schema: SchemaObject::object().property(
                "message",
                PropertyType::String,
                "The message to echo back",
            ),
        };
        let json = serde_json::to_value(&desc).unwrap();
        assert!(json.get("inputSchema").is_some());
        assert_eq!(json["inputSchema"]["type"], "object");
        assert_eq!(
            json["inputSchema"]["properties"]["message"]["type"],
            "string"
        );
    }

    #[test]
    fn test_schema_roundtrip() {
        let schema = SchemaObject::object()
            .property("age", PropertyType::Number, "Age in years")
            .property("name", PropertyType::String, "Full name")
            .require("age");
        let json = serde_json::to_string(&schema).unwrap();
        let parsed: SchemaObject = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schema);
        // Property order survives the roundtrip.
        let keys: Vec<&String> = parsed.properties.keys().collect();
        assert_eq!(keys, ["age", "name"]);
    }

    #[test]
    fn test_required_must_be_declared() {
        let ok = SchemaObject::object()
            .property("age", PropertyType::Number, "Age")
            .require("age");
        assert_eq!(ok.undeclared_required(), None);

        let bad = SchemaObject::object()
            .property("age", PropertyType::Number, "Age")
            .require("weight");
        assert_eq!(bad.undeclared_required(), Some("weight"));
    }

    #[test]
    fn test_empty_required_omitted_from_wire() {
        let schema = SchemaObject::object().property("q", PropertyType::String, "Query");
        let json = serde_json::to_string(&schema).unwrap();
        assert!(!json.contains("required"));
    }
}
