//! Read-only snapshots a workflow reasons over.
//!
//! Each snapshot holds only what the plan needs to decide the next step.
//! Readers fetch them scoped to the acting owner.

use serde::{Deserialize, Serialize};

use super::{ArrearsLadder, LadderPosition};
use crate::domain::foundation::{ActorId, OwnedByActor, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub id: String,
    pub owner_id: ActorId,
    pub address: String,
    /// vacant, tenanted, listed, ...
    pub status: String,
    pub weekly_rent_cents: Option<i64>,
}

impl OwnedByActor for PropertySnapshot {
    fn owner_id(&self) -> &ActorId {
        &self.owner_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub id: String,
    /// draft, published, closed
    pub status: String,
    pub weekly_rent_cents: Option<i64>,
    pub application_count: i64,
}

impl ListingSnapshot {
    pub fn is_published(&self) -> bool {
        self.status == "published"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    pub id: String,
    pub applicant_name: String,
    pub applicant_email: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenancySnapshot {
    pub id: String,
    pub property_id: String,
    /// pending, active, ending, ended
    pub status: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub weekly_rent_cents: Option<i64>,
    pub tenant_emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceSnapshot {
    pub id: String,
    pub property_id: String,
    pub title: String,
    /// open, quoting, approved, assigned, in_progress, completed
    pub status: String,
    pub urgency: String,
    pub estimated_cost_cents: Option<i64>,
    pub quote_count: i64,
    pub lowest_quote_cents: Option<i64>,
    pub assigned_trade_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsAction {
    pub action_type: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsSnapshot {
    pub id: String,
    pub amount_cents: i64,
    pub days_overdue: i64,
    pub prior_actions: Vec<ArrearsAction>,
}

impl ArrearsSnapshot {
    /// Logged action types, oldest first.
    pub fn action_types(&self) -> Vec<&str> {
        let mut actions: Vec<&ArrearsAction> = self.prior_actions.iter().collect();
        actions.sort_by_key(|a| a.created_at);
        actions.into_iter().map(|a| a.action_type.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindTenantState {
    pub property: PropertySnapshot,
    pub active_listing: Option<ListingSnapshot>,
    pub shortlisted: Vec<ApplicationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardTenantState {
    pub property: PropertySnapshot,
    pub active_tenancy: Option<TenancySnapshot>,
    pub shortlisted: Vec<ApplicationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndTenancyState {
    pub tenancy: TenancySnapshot,
    pub property: PropertySnapshot,
    pub open_maintenance_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceState {
    pub request: MaintenanceSnapshot,
    pub property: PropertySnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrearsState {
    pub tenancy: TenancySnapshot,
    pub arrears: Option<ArrearsSnapshot>,
}

impl ArrearsState {
    /// The arrears record, if it still carries a balance.
    pub fn outstanding(&self) -> Option<&ArrearsSnapshot> {
        self.arrears.as_ref().filter(|a| a.amount_cents > 0)
    }

    /// Where the tenancy sits on the ladder. A missing or settled record is
    /// never overdue, whatever its day count says.
    pub fn ladder_position(&self, ladder: &ArrearsLadder) -> LadderPosition {
        self.outstanding()
            .map(|a| ladder.position(a.days_overdue, &a.action_types()))
            .unwrap_or(LadderPosition::NotOverdue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workflow::ArrearsRung;

    #[test]
    fn action_types_are_chronological() {
        let now = Timestamp::now();
        let snapshot = ArrearsSnapshot {
            id: "arr-1".into(),
            amount_cents: 90_000,
            days_overdue: 10,
            prior_actions: vec![
                ArrearsAction {
                    action_type: "formal_notice".into(),
                    created_at: now,
                },
                ArrearsAction {
                    action_type: "friendly_reminder".into(),
                    created_at: now.minus_days(6),
                },
            ],
        };

        assert_eq!(snapshot.action_types(), vec!["friendly_reminder", "formal_notice"]);
    }

    fn tenancy() -> TenancySnapshot {
        TenancySnapshot {
            id: "ten-1".into(),
            property_id: "prop-1".into(),
            status: "active".into(),
            start_date: None,
            end_date: None,
            weekly_rent_cents: Some(50_000),
            tenant_emails: vec![],
        }
    }

    fn arrears_state(amount_cents: i64, days_overdue: i64) -> ArrearsState {
        ArrearsState {
            tenancy: tenancy(),
            arrears: Some(ArrearsSnapshot {
                id: "arr-1".into(),
                amount_cents,
                days_overdue,
                prior_actions: vec![],
            }),
        }
    }

    #[test]
    fn settled_balance_is_not_overdue() {
        let state = arrears_state(0, 15);
        assert!(state.outstanding().is_none());
        assert_eq!(
            state.ladder_position(&ArrearsLadder::default()),
            LadderPosition::NotOverdue
        );
    }

    #[test]
    fn outstanding_balance_follows_the_ladder() {
        let position = arrears_state(40_000, 15).ladder_position(&ArrearsLadder::default());
        assert!(matches!(
            position,
            LadderPosition::Recommend { rung: ArrearsRung::BreachNotice, .. }
        ));
    }
}
