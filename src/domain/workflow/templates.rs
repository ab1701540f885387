//! Plan templates, one per workflow.
//!
//! Each template is a pure function of the fetched state and the workflow
//! settings. Steps already satisfied by the state are left out so the model
//! picks up where the process actually is.

use serde_json::json;

use super::{
    ApprovalGate, ArrearsLadder, ArrearsRung, ArrearsState, EndTenancyState, FindTenantState,
    LadderPosition, MaintenanceState, OnboardTenantState, WorkflowKind, WorkflowPlan,
};
use crate::domain::tools::ToolName;

/// Tunables shared by the plan templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Quotes at or under this amount may be approved without asking.
    pub auto_approve_threshold_cents: i64,
    pub ladder: ArrearsLadder,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            auto_approve_threshold_cents: 50_000,
            ladder: ArrearsLadder::default(),
        }
    }
}

pub fn find_tenant_plan(state: &FindTenantState) -> WorkflowPlan {
    let property_id = &state.property.id;
    let mut plan = WorkflowPlan::new(
        WorkflowKind::FindTenant,
        format!("Find a tenant for {}", state.property.address),
    );

    match &state.active_listing {
        None => {
            plan = plan
                .step(
                    ToolName::CreateListing,
                    "Draft a listing. Suggest weekly rent from the property's current rent and recall the owner's listing preferences first.",
                    json!({ "property_id": property_id, "rent_amount": state.property.weekly_rent_cents }),
                    None,
                )
                .step(
                    ToolName::PublishListing,
                    "Show the owner the draft and publish once they approve it.",
                    json!({ "listing_id": "<from create_listing>" }),
                    Some(ApprovalGate::OwnerConfirmation),
                );
        }
        Some(listing) if !listing.is_published() => {
            plan = plan.step(
                ToolName::PublishListing,
                "A draft listing already exists. Review it with the owner and publish.",
                json!({ "listing_id": listing.id }),
                Some(ApprovalGate::OwnerConfirmation),
            );
        }
        Some(_) => {
            plan = plan.note("The listing is already published; do not create another one.");
        }
    }

    let listing_ref = state
        .active_listing
        .as_ref()
        .map(|l| json!(l.id))
        .unwrap_or_else(|| json!("<listing_id>"));

    plan = plan
        .step(
            ToolName::ListApplications,
            "Review incoming applications and summarise the strongest applicants.",
            json!({ "listing_id": listing_ref }),
            None,
        )
        .step(
            ToolName::ShortlistApplicant,
            "Shortlist applicants the owner chooses.",
            json!({ "application_id": "<chosen application>" }),
            Some(ApprovalGate::OwnerConfirmation),
        );

    if !state.shortlisted.is_empty() {
        plan = plan
            .step(
                ToolName::WorkflowOnboardTenant,
                "An applicant is shortlisted. Move to onboarding once the owner picks one.",
                json!({ "property_id": property_id }),
                None,
            )
            .note(format!("{} applicant(s) already shortlisted.", state.shortlisted.len()));
    }

    plan
}

pub fn onboard_tenant_plan(state: &OnboardTenantState) -> WorkflowPlan {
    let property_id = &state.property.id;
    let mut plan = WorkflowPlan::new(
        WorkflowKind::OnboardTenant,
        format!("Onboard a new tenant at {}", state.property.address),
    );

    let tenancy_ref = match &state.active_tenancy {
        Some(tenancy) => {
            plan = plan.note(format!(
                "Tenancy {} already exists with status '{}'; continue from it.",
                tenancy.id, tenancy.status
            ));
            json!(tenancy.id)
        }
        None => {
            if state.shortlisted.is_empty() {
                plan = plan.note("No applicant is shortlisted yet. Confirm the incoming tenant's details with the owner.");
            }
            plan = plan.step(
                ToolName::CreateTenancy,
                "Create the tenancy with agreed start date and rent once the owner confirms the applicant.",
                json!({ "property_id": property_id, "start_date": "<agreed>", "rent_amount": state.property.weekly_rent_cents }),
                Some(ApprovalGate::OwnerConfirmation),
            );
            json!("<from create_tenancy>")
        }
    };

    plan.step(
        ToolName::GenerateLease,
        "Draft the lease from the tenancy data; it only takes effect once the tenant signs.",
        json!({ "tenancy_id": tenancy_ref }),
        Some(ApprovalGate::TenantSignature),
    )
    .step(
        ToolName::InviteTenant,
        "Invite the tenant to the app.",
        json!({ "tenancy_id": tenancy_ref, "email": "<tenant email>" }),
        None,
    )
    .step(
        ToolName::ScheduleInspection,
        "Book the entry condition inspection before the move-in date.",
        json!({ "property_id": property_id, "inspection_type": "entry" }),
        None,
    )
    .step(
        ToolName::SendEmail,
        "Send the welcome email.",
        json!({ "context_type": "tenant_welcome", "recipient_type": "tenant" }),
        None,
    )
}

pub fn end_tenancy_plan(state: &EndTenancyState) -> WorkflowPlan {
    let tenancy_id = &state.tenancy.id;
    let mut plan = WorkflowPlan::new(
        WorkflowKind::EndTenancy,
        format!("End tenancy {} at {}", tenancy_id, state.property.address),
    );

    if state.tenancy.status == "ended" {
        return plan.note("This tenancy has already ended. Offer to start the find-a-tenant workflow instead.");
    }

    if state.open_maintenance_count > 0 {
        plan = plan.note(format!(
            "{} maintenance request(s) are still open on this property; resolve or carry them over before the exit inspection.",
            state.open_maintenance_count
        ));
    }

    plan.step(
        ToolName::ScheduleInspection,
        "Book the exit inspection for the final day of the tenancy.",
        json!({ "property_id": state.property.id, "inspection_type": "exit", "scheduled_date": state.tenancy.end_date }),
        None,
    )
    .step(
        ToolName::CompleteInspection,
        "Record exit findings and compare against the entry report.",
        json!({ "inspection_id": "<from schedule_inspection>" }),
        None,
    )
    .step(
        ToolName::EndTenancy,
        "End the tenancy once the owner has agreed any bond deductions.",
        json!({ "tenancy_id": tenancy_id, "end_date": state.tenancy.end_date }),
        Some(ApprovalGate::OwnerConfirmation),
    )
    .step(
        ToolName::WorkflowFindTenant,
        "Offer to re-list the property.",
        json!({ "property_id": state.property.id }),
        None,
    )
}

pub fn maintenance_plan(state: &MaintenanceState, settings: &WorkflowSettings) -> WorkflowPlan {
    let request = &state.request;
    let gate = ApprovalGate::CostThreshold {
        threshold_cents: settings.auto_approve_threshold_cents,
    };
    let mut plan = WorkflowPlan::new(
        WorkflowKind::MaintenanceLifecycle,
        format!("Resolve maintenance request '{}'", request.title),
    );

    match request.status.as_str() {
        "completed" | "closed" => {
            return plan.note("This request is already complete. Confirm with the owner whether to close it out.");
        }
        "assigned" | "in_progress" => {
            return plan
                .step(
                    ToolName::UpdateMaintenanceStatus,
                    "Mark the job completed once the trade confirms the work is done.",
                    json!({ "request_id": request.id, "status": "completed" }),
                    None,
                )
                .step(
                    ToolName::SendEmail,
                    "Let the tenant know the job is finished.",
                    json!({ "context_type": "maintenance_update", "recipient_type": "tenant" }),
                    None,
                );
        }
        _ => {}
    }

    if request.quote_count == 0 {
        plan = plan
            .step(
                ToolName::ListTrades,
                "Find trades in the owner's network matching the job. Recall the owner's preferred trades first.",
                json!({ "speciality": "<from request>" }),
                None,
            )
            .step(
                ToolName::RequestTradeQuote,
                "Ask suitable trades to quote.",
                json!({ "request_id": request.id, "trade_ids": "<chosen trades>" }),
                None,
            )
            .note("Wait for quotes before approving anything.");
        return plan;
    }

    let over_threshold = request
        .lowest_quote_cents
        .or(request.estimated_cost_cents)
        .map_or(true, |c| c > settings.auto_approve_threshold_cents);
    if over_threshold {
        plan = plan.note(
            "The cost exceeds the auto-approve threshold (or is unknown). Present the quotes to the owner instead of approving automatically.",
        );
    }

    plan.step(
        ToolName::ApproveQuote,
        "Approve the chosen quote.",
        json!({ "quote_id": "<chosen quote>" }),
        Some(gate),
    )
    .step(
        ToolName::AssignTrade,
        "Assign the trade whose quote was approved.",
        json!({ "request_id": request.id, "trade_id": "<quote's trade>" }),
        None,
    )
    .step(
        ToolName::SendEmail,
        "Send the work order to the trade.",
        json!({ "context_type": "trade_work_order", "recipient_type": "trade" }),
        None,
    )
}

/// Plan for the ladder position the caller already computed with
/// [`ArrearsState::ladder_position`], so the plan and any alert agree.
pub fn arrears_plan(state: &ArrearsState, position: &LadderPosition) -> WorkflowPlan {
    let tenancy_id = &state.tenancy.id;
    let plan = WorkflowPlan::new(
        WorkflowKind::ArrearsEscalation,
        format!("Recover overdue rent on tenancy {}", tenancy_id),
    );

    let arrears = match state.outstanding() {
        Some(a) => a,
        None => return plan.note("No arrears are recorded for this tenancy. Nothing to escalate."),
    };
    let arrears_id = &arrears.id;

    match position {
        LadderPosition::NotOverdue => plan.note("Rent is not yet overdue. Nothing to escalate."),
        LadderPosition::Exhausted => plan.note(
            "Every escalation step has been taken. Discuss next steps with the owner directly.",
        ),
        LadderPosition::Wait {
            next,
            eligible_at_day,
        } => plan.note(format!(
            "All steps due at {} days overdue have been taken. Wait until day {} before the {}.",
            arrears.days_overdue,
            eligible_at_day,
            next.as_str().replace('_', " ")
        )),
        LadderPosition::Recommend { rung, skipped } => {
            let mut plan = rung_steps(plan, *rung, tenancy_id, arrears_id);
            if !skipped.is_empty() {
                let names: Vec<&str> = skipped.iter().map(|r| r.as_str()).collect();
                plan = plan.note(format!(
                    "Earlier steps were never logged: {}. Check with the owner whether they happened outside the app.",
                    names.join(", ")
                ));
            }
            plan.step(
                ToolName::LogArrearsAction,
                "Log the step once done so it is not repeated.",
                json!({ "arrears_id": arrears_id, "action_type": rung.as_str() }),
                None,
            )
        }
    }
}

fn rung_steps(
    plan: WorkflowPlan,
    rung: ArrearsRung,
    tenancy_id: &str,
    arrears_id: &str,
) -> WorkflowPlan {
    match rung {
        ArrearsRung::FriendlyReminder => plan.step(
            ToolName::SendEmail,
            "Send a friendly rent reminder.",
            json!({ "context_type": "rent_reminder", "recipient_type": "tenant" }),
            None,
        ),
        ArrearsRung::FormalNotice => plan.step(
            ToolName::SendEmail,
            "Send a formal arrears notice stating the amount owed.",
            json!({ "context_type": "arrears_notice", "recipient_type": "tenant" }),
            Some(ApprovalGate::OwnerConfirmation),
        ),
        ArrearsRung::BreachNotice => plan
            .step(
                ToolName::GenerateBreachNotice,
                "Draft the breach notice for non-payment.",
                json!({ "tenancy_id": tenancy_id, "breach_type": "non_payment" }),
                Some(ApprovalGate::OwnerConfirmation),
            )
            .step(
                ToolName::SendEmail,
                "Send the breach notice once the owner approves the draft.",
                json!({ "context_type": "breach_notice", "recipient_type": "tenant" }),
                None,
            ),
        ArrearsRung::PaymentPlanOffer => plan.step(
            ToolName::CreatePaymentPlan,
            "Offer an instalment plan to clear the arrears.",
            json!({ "arrears_id": arrears_id, "frequency": "weekly" }),
            Some(ApprovalGate::OwnerConfirmation),
        ),
        ArrearsRung::TribunalPreparation => plan
            .step(
                ToolName::GetTenancyDocuments,
                "Collect the lease, rent ledger and notices issued.",
                json!({ "tenancy_id": tenancy_id }),
                None,
            )
            .note("Tribunal applications cannot be filed from the app yet; help the owner assemble the evidence."),
    }
}
