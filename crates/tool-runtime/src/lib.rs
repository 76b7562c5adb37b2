pub mod dispatch;
pub mod registry;
pub mod schema;
pub mod tool;
pub mod tools;

pub use dispatch::{ArgumentPolicy, DispatchError, Dispatcher};
pub use registry::{RegistryError, ToolRegistry};
pub use schema::{PropertySchema, PropertyType, SchemaObject, ToolDescriptor};
pub use tool::{EchoTool, Tool, ToolContent, ToolError};
pub use tools::{ConditionDetailsTool, PatientConditionsTool, RiskScoreTool};
