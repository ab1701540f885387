//! Workflow kinds and the plan shape returned to the model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::tools::ToolName;

/// A multi-step business process the model can ask for guidance on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    FindTenant,
    OnboardTenant,
    EndTenancy,
    MaintenanceLifecycle,
    ArrearsEscalation,
}

impl WorkflowKind {
    pub const ALL: &'static [WorkflowKind] = &[
        WorkflowKind::FindTenant,
        WorkflowKind::OnboardTenant,
        WorkflowKind::EndTenancy,
        WorkflowKind::MaintenanceLifecycle,
        WorkflowKind::ArrearsEscalation,
    ];

    /// Returns the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::FindTenant => "find_tenant",
            WorkflowKind::OnboardTenant => "onboard_tenant",
            WorkflowKind::EndTenancy => "end_tenancy",
            WorkflowKind::MaintenanceLifecycle => "maintenance_lifecycle",
            WorkflowKind::ArrearsEscalation => "arrears_escalation",
        }
    }

    /// The tool that exposes this workflow.
    pub fn tool(&self) -> ToolName {
        match self {
            WorkflowKind::FindTenant => ToolName::WorkflowFindTenant,
            WorkflowKind::OnboardTenant => ToolName::WorkflowOnboardTenant,
            WorkflowKind::EndTenancy => ToolName::WorkflowEndTenancy,
            WorkflowKind::MaintenanceLifecycle => ToolName::WorkflowMaintenanceLifecycle,
            WorkflowKind::ArrearsEscalation => ToolName::WorkflowArrearsEscalation,
        }
    }

    /// Reverse of [`WorkflowKind::tool`].
    pub fn from_tool(tool: ToolName) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tool() == tool)
    }

    /// Parses the snake_case name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A checkpoint the model must honour before acting on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApprovalGate {
    /// Ask the owner before calling the tool.
    OwnerConfirmation,
    /// Auto-approve only at or under the threshold; above it, present
    /// options to the owner instead.
    CostThreshold { threshold_cents: i64 },
    /// The tenant must sign before the step counts as done.
    TenantSignature,
}

/// One recommended tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub order: u32,
    pub tool: ToolName,
    pub instruction: String,
    /// Approximate inputs; the model fills the rest.
    pub inputs: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<ApprovalGate>,
}

/// Ordered guidance for one workflow invocation.
///
/// Advice only: the model sequences the calls and requests confirmation
/// where a gate applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowPlan {
    pub workflow: WorkflowKind,
    pub goal: String,
    pub steps: Vec<PlanStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl WorkflowPlan {
    /// Starts an empty plan.
    pub fn new(workflow: WorkflowKind, goal: impl Into<String>) -> Self {
        Self {
            workflow,
            goal: goal.into(),
            steps: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Appends a step, numbering it after the last one.
    pub fn step(
        mut self,
        tool: ToolName,
        instruction: impl Into<String>,
        inputs: Value,
        gate: Option<ApprovalGate>,
    ) -> Self {
        let order = self.steps.len() as u32 + 1;
        self.steps.push(PlanStep {
            order,
            tool,
            instruction: instruction.into(),
            inputs,
            gate,
        });
        self
    }

    /// Appends a note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Tools named by the plan, in order.
    pub fn tools(&self) -> Vec<ToolName> {
        self.steps.iter().map(|s| s.tool).collect()
    }
}
