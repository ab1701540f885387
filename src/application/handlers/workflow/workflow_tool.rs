//! Tool handler for the `workflow_*` tools.

use async_trait::async_trait;
use std::sync::Arc;

use super::WorkflowOrchestrator;
use crate::domain::tools::{ToolCall, ToolName, ToolResult};
use crate::domain::workflow::WorkflowKind;
use crate::ports::{ToolHandler, ToolHandlerError};

/// One handler for all five workflow tools; the tool name picks the workflow.
pub struct WorkflowToolHandler {
    orchestrator: Arc<WorkflowOrchestrator>,
}

impl WorkflowToolHandler {
    pub fn new(orchestrator: Arc<WorkflowOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// The tool names this handler serves.
    pub fn tools() -> Vec<ToolName> {
        WorkflowKind::ALL.iter().map(|k| k.tool()).collect()
    }
}

#[async_trait]
impl ToolHandler for WorkflowToolHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let kind = call
            .name()
            .parse::<ToolName>()
            .ok()
            .and_then(WorkflowKind::from_tool)
            .ok_or_else(|| {
                ToolHandlerError::internal(format!("'{}' is not a workflow tool", call.name()))
            })?;

        self.orchestrator.describe(kind, call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryWorkflowStateReader;
    use crate::domain::foundation::ActorId;
    use crate::domain::workflow::WorkflowSettings;
    use serde_json::Map;

    fn handler() -> WorkflowToolHandler {
        WorkflowToolHandler::new(Arc::new(WorkflowOrchestrator::new(
            Arc::new(InMemoryWorkflowStateReader::new()),
            WorkflowSettings::default(),
        )))
    }

    #[test]
    fn serves_every_workflow_tool() {
        let tools = WorkflowToolHandler::tools();
        assert_eq!(tools.len(), 5);
        assert!(tools.contains(&ToolName::WorkflowArrearsEscalation));
    }

    #[tokio::test]
    async fn non_workflow_tool_is_an_error() {
        let call = ToolCall::new("get_property", Map::new(), ActorId::new("owner-a").unwrap());
        assert!(handler().handle(&call).await.is_err());
    }

    #[tokio::test]
    async fn routes_by_tool_name() {
        let mut input = Map::new();
        input.insert("request_id".into(), "req-404".into());
        let call = ToolCall::new(
            "workflow_maintenance_lifecycle",
            input,
            ActorId::new("owner-a").unwrap(),
        );

        let err = handler().handle(&call).await.unwrap_err();
        assert_eq!(err.to_string(), "Maintenance request not found: req-404");
    }
}
