//! Workflow - guidance for multi-step business processes.
//!
//! A workflow returns the relevant current state plus an ordered plan of
//! which tools to call next. It never calls those tools itself.

mod arrears;
mod plan;
mod state;
mod templates;

pub use arrears::{ArrearsLadder, ArrearsRung, LadderPosition};
pub use plan::{ApprovalGate, PlanStep, WorkflowKind, WorkflowPlan};
pub use state::{
    ApplicationSnapshot, ArrearsAction, ArrearsSnapshot, ArrearsState, EndTenancyState,
    FindTenantState, ListingSnapshot, MaintenanceSnapshot, MaintenanceState, OnboardTenantState,
    PropertySnapshot, TenancySnapshot,
};
pub use templates::{
    arrears_plan, end_tenancy_plan, find_tenant_plan, maintenance_plan, onboard_tenant_plan,
    WorkflowSettings,
};
