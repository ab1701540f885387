//! Workflow orchestrator.
//!
//! `describe` fetches the ownership-scoped state for a workflow and returns
//! it with the plan built from that state. Nothing is executed; the model
//! reads the plan and makes the calls itself.

use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::spawn_notification;
use crate::domain::foundation::{ActorId, ActorRole, DomainError, ErrorCode};
use crate::domain::tools::{GuidedOutput, ToolCall, ToolResult};
use crate::domain::workflow::{
    arrears_plan, end_tenancy_plan, find_tenant_plan, maintenance_plan, onboard_tenant_plan,
    ArrearsRung, ArrearsState, LadderPosition, WorkflowKind, WorkflowPlan, WorkflowSettings,
};
use crate::ports::{
    Notification, NotificationDispatcher, ToolHandlerError, WorkflowStateReader,
};

pub struct WorkflowOrchestrator {
    reader: Arc<dyn WorkflowStateReader>,
    settings: WorkflowSettings,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
}

impl WorkflowOrchestrator {
    pub fn new(reader: Arc<dyn WorkflowStateReader>, settings: WorkflowSettings) -> Self {
        Self {
            reader,
            settings,
            notifier: None,
        }
    }

    /// Notifies the owner when an arrears plan reaches the breach notice rung
    /// or beyond.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Returns `{data: relevant_state, guidance: plan}` for one workflow.
    ///
    /// A missing or foreign entity is a "not found" error.
    pub async fn describe(
        &self,
        kind: WorkflowKind,
        call: &ToolCall,
    ) -> Result<ToolResult, ToolHandlerError> {
        if call.role() != ActorRole::Owner {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Workflow '{}' is forbidden for tenants; only property owners can use it", kind),
            )
            .into());
        }

        let owner = call.actor_id();

        let (data, plan) = match kind {
            WorkflowKind::FindTenant => {
                let id = call.require_str("property_id")?;
                let state = self
                    .reader
                    .find_tenant_state(owner, id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Property", id))?;
                (to_data(&state)?, find_tenant_plan(&state))
            }
            WorkflowKind::OnboardTenant => {
                let id = call.require_str("property_id")?;
                let state = self
                    .reader
                    .onboard_tenant_state(owner, id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Property", id))?;
                (to_data(&state)?, onboard_tenant_plan(&state))
            }
            WorkflowKind::EndTenancy => {
                let id = call.require_str("tenancy_id")?;
                let state = self
                    .reader
                    .end_tenancy_state(owner, id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Tenancy", id))?;
                (to_data(&state)?, end_tenancy_plan(&state))
            }
            WorkflowKind::MaintenanceLifecycle => {
                let id = call.require_str("request_id")?;
                let state = self
                    .reader
                    .maintenance_state(owner, id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Maintenance request", id))?;
                (to_data(&state)?, maintenance_plan(&state, &self.settings))
            }
            WorkflowKind::ArrearsEscalation => {
                let id = call.require_str("tenancy_id")?;
                let state = self
                    .reader
                    .arrears_state(owner, id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Tenancy", id))?;
                self.arrears(owner, &state)?
            }
        };

        tracing::debug!(
            workflow = %kind,
            actor_id = %owner,
            steps = plan.steps.len(),
            "Workflow described"
        );

        Ok(GuidedOutput::new(data, plan).into_result())
    }

    fn arrears(
        &self,
        owner: &ActorId,
        state: &ArrearsState,
    ) -> Result<(Value, WorkflowPlan), ToolHandlerError> {
        let position = state.ladder_position(&self.settings.ladder);

        if let (Some(notifier), LadderPosition::Recommend { rung, .. }) = (&self.notifier, &position)
        {
            if *rung >= ArrearsRung::BreachNotice {
                let notification = Notification::new(
                    owner.clone(),
                    "arrears_escalation",
                    "Arrears escalation due",
                    format!(
                        "Tenancy {} is due for the {} step.",
                        state.tenancy.id,
                        rung.as_str().replace('_', " ")
                    ),
                )
                .with_data(json!({ "tenancy_id": state.tenancy.id, "rung": rung }));
                spawn_notification(notifier.clone(), notification);
            }
        }

        let mut data = to_data(state)?;
        if let Value::Object(map) = &mut data {
            map.insert("ladder_position".to_string(), to_data(&position)?);
        }

        Ok((data, arrears_plan(state, &position)))
    }
}

fn to_data<T: Serialize>(value: &T) -> Result<Value, ToolHandlerError> {
    serde_json::to_value(value)
        .map_err(|e| ToolHandlerError::internal(format!("Failed to serialize workflow state: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryWorkflowStateReader;
    use crate::adapters::notifications::MockNotificationDispatcher;
    use crate::domain::foundation::Timestamp;
    use crate::domain::workflow::{
        ArrearsAction, ArrearsSnapshot, FindTenantState, MaintenanceSnapshot, MaintenanceState,
        PropertySnapshot, TenancySnapshot,
    };
    use serde_json::Map;

    fn owner() -> ActorId {
        ActorId::new("owner-a").unwrap()
    }

    fn property(id: &str) -> PropertySnapshot {
        PropertySnapshot {
            id: id.to_string(),
            owner_id: owner(),
            address: "12 Harbour St".to_string(),
            status: "vacant".to_string(),
            weekly_rent_cents: Some(65_000),
        }
    }

    fn tenancy(id: &str) -> TenancySnapshot {
        TenancySnapshot {
            id: id.to_string(),
            property_id: "prop-1".to_string(),
            status: "active".to_string(),
            start_date: Some("2026-01-01".to_string()),
            end_date: None,
            weekly_rent_cents: Some(65_000),
            tenant_emails: vec!["tenant@example.com".to_string()],
        }
    }

    fn call(tool: &str, input: Value) -> ToolCall {
        ToolCall::new(tool, input.as_object().cloned().unwrap_or_else(Map::new), owner())
            .with_role(ActorRole::Owner)
    }

    fn orchestrator(reader: InMemoryWorkflowStateReader) -> WorkflowOrchestrator {
        WorkflowOrchestrator::new(Arc::new(reader), WorkflowSettings::default())
    }

    #[tokio::test]
    async fn find_tenant_returns_state_and_plan() {
        let reader = InMemoryWorkflowStateReader::new();
        reader
            .insert_find_tenant(FindTenantState {
                property: property("prop-1"),
                active_listing: None,
                shortlisted: vec![],
            })
            .await;

        let result = orchestrator(reader)
            .describe(
                WorkflowKind::FindTenant,
                &call("workflow_find_tenant", json!({ "property_id": "prop-1" })),
            )
            .await
            .unwrap();

        let data = result.data().unwrap();
        assert_eq!(data["data"]["property"]["id"], "prop-1");
        assert_eq!(data["guidance"]["workflow"], "find_tenant");
        assert!(!data["guidance"]["steps"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_property_is_not_found() {
        let reader = InMemoryWorkflowStateReader::new();
        reader
            .insert_find_tenant(FindTenantState {
                property: property("prop-1"),
                active_listing: None,
                shortlisted: vec![],
            })
            .await;
        let stranger = ToolCall::new(
            "workflow_find_tenant",
            json!({ "property_id": "prop-1" }).as_object().cloned().unwrap(),
            ActorId::new("owner-b").unwrap(),
        );

        let err = orchestrator(reader)
            .describe(WorkflowKind::FindTenant, &stranger)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Property not found: prop-1");
    }

    #[tokio::test]
    async fn missing_id_is_a_parameter_error() {
        let err = orchestrator(InMemoryWorkflowStateReader::new())
            .describe(WorkflowKind::EndTenancy, &call("workflow_end_tenancy", json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required parameter: tenancy_id");
    }

    #[tokio::test]
    async fn tenants_cannot_run_workflows() {
        let tenant_call = ToolCall::new(
            "workflow_find_tenant",
            json!({ "property_id": "prop-1" }).as_object().cloned().unwrap(),
            ActorId::new("tenant-a").unwrap(),
        )
        .with_role(ActorRole::Tenant);

        let err = orchestrator(InMemoryWorkflowStateReader::new())
            .describe(WorkflowKind::FindTenant, &tenant_call)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("forbidden for tenants"));
    }

    #[tokio::test]
    async fn maintenance_plan_uses_configured_threshold() {
        let reader = InMemoryWorkflowStateReader::new();
        reader
            .insert_maintenance(MaintenanceState {
                request: MaintenanceSnapshot {
                    id: "req-1".to_string(),
                    property_id: "prop-1".to_string(),
                    title: "Leaking tap".to_string(),
                    status: "quoting".to_string(),
                    urgency: "routine".to_string(),
                    estimated_cost_cents: None,
                    quote_count: 2,
                    lowest_quote_cents: Some(30_000),
                    assigned_trade_id: None,
                },
                property: property("prop-1"),
            })
            .await;
        let settings = WorkflowSettings {
            auto_approve_threshold_cents: 12_345,
            ..WorkflowSettings::default()
        };

        let result = WorkflowOrchestrator::new(Arc::new(reader), settings)
            .describe(
                WorkflowKind::MaintenanceLifecycle,
                &call("workflow_maintenance_lifecycle", json!({ "request_id": "req-1" })),
            )
            .await
            .unwrap();

        let text = result.data().unwrap()["guidance"].to_string();
        assert!(text.contains("12345"));
    }

    #[tokio::test]
    async fn arrears_includes_ladder_position_and_notifies() {
        let reader = InMemoryWorkflowStateReader::new();
        let now = Timestamp::now();
        reader
            .insert_arrears(
                &owner(),
                ArrearsState {
                    tenancy: tenancy("ten-1"),
                    arrears: Some(ArrearsSnapshot {
                        id: "arr-1".to_string(),
                        amount_cents: 130_000,
                        days_overdue: 15,
                        prior_actions: vec![
                            ArrearsAction {
                                action_type: "friendly_reminder".to_string(),
                                created_at: now.minus_days(12),
                            },
                            ArrearsAction {
                                action_type: "formal_notice".to_string(),
                                created_at: now.minus_days(6),
                            },
                        ],
                    }),
                },
            )
            .await;
        let notifier = MockNotificationDispatcher::new();
        let orchestrator = orchestrator(reader).with_notifier(Arc::new(notifier.clone()));

        let result = orchestrator
            .describe(
                WorkflowKind::ArrearsEscalation,
                &call("workflow_arrears_escalation", json!({ "tenancy_id": "ten-1" })),
            )
            .await
            .unwrap();

        let data = result.data().unwrap();
        assert_eq!(data["data"]["ladder_position"]["status"], "recommend");
        assert_eq!(data["data"]["ladder_position"]["rung"], "breach_notice");

        tokio::task::yield_now().await;
        for _ in 0..10 {
            if !notifier.sent().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(notifier.sent()[0].kind, "arrears_escalation");
    }

    #[tokio::test]
    async fn arrears_without_record_is_not_overdue() {
        let reader = InMemoryWorkflowStateReader::new();
        reader
            .insert_arrears(
                &owner(),
                ArrearsState {
                    tenancy: tenancy("ten-1"),
                    arrears: None,
                },
            )
            .await;

        let result = orchestrator(reader)
            .describe(
                WorkflowKind::ArrearsEscalation,
                &call("workflow_arrears_escalation", json!({ "tenancy_id": "ten-1" })),
            )
            .await
            .unwrap();

        let data = result.data().unwrap();
        assert_eq!(data["data"]["ladder_position"]["status"], "not_overdue");
        assert!(data["guidance"]["steps"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn settled_arrears_neither_escalates_nor_notifies() {
        let reader = InMemoryWorkflowStateReader::new();
        reader
            .insert_arrears(
                &owner(),
                ArrearsState {
                    tenancy: tenancy("ten-1"),
                    arrears: Some(ArrearsSnapshot {
                        id: "arr-1".to_string(),
                        amount_cents: 0,
                        days_overdue: 15,
                        prior_actions: vec![],
                    }),
                },
            )
            .await;
        let notifier = MockNotificationDispatcher::new();
        let orchestrator = orchestrator(reader).with_notifier(Arc::new(notifier.clone()));

        let result = orchestrator
            .describe(
                WorkflowKind::ArrearsEscalation,
                &call("workflow_arrears_escalation", json!({ "tenancy_id": "ten-1" })),
            )
            .await
            .unwrap();

        let data = result.data().unwrap();
        assert_eq!(data["data"]["ladder_position"]["status"], "not_overdue");
        assert!(data["guidance"]["steps"].as_array().unwrap().is_empty());

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(notifier.sent().is_empty());
    }
}
