//! Workflow handlers - state lookup plus plan, exposed as `workflow_*` tools.

mod orchestrator;
mod workflow_tool;

pub use orchestrator::WorkflowOrchestrator;
pub use workflow_tool::WorkflowToolHandler;
