//! Agent tools - the closed catalogue of capabilities the model may invoke.
//!
//! ## Key Types
//!
//! - [`ToolName`] - Closed enumeration of every catalogued tool
//! - [`ToolCategory`] - Business area a tool belongs to
//! - [`ToolMeta`] / [`ToolRegistry`] - Read-only catalogue metadata
//! - [`ToolCall`] - One model-emitted request with the acting identity
//! - [`ToolResult`] - Uniform `Success{data}` / `Failure{message}` outcome
//! - [`GuidedOutput`] - `{data, guidance}` payload for planning tools
//! - [`ToolDefinition`] - Model-facing tool description

mod catalog;
mod category;
mod tool_call;
mod tool_definition;
mod tool_registry;
mod tool_result;

pub use catalog::{ToolName, UnknownToolError};
pub use category::ToolCategory;
pub use tool_call::{json_type_name, ParamError, ToolCall};
pub use tool_definition::ToolDefinition;
pub use tool_registry::{ToolMeta, ToolRegistry};
pub use tool_result::{GuidedOutput, ToolResult};
