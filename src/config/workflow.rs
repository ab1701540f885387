//! Workflow configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::workflow::{ArrearsLadder, WorkflowSettings};

/// Approval threshold and arrears ladder offsets
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Quotes at or under this amount (cents) may be auto-approved
    #[serde(default = "default_auto_approve_threshold")]
    pub auto_approve_threshold_cents: i64,

    #[serde(default = "default_friendly_reminder_days")]
    pub friendly_reminder_days: i64,

    #[serde(default = "default_formal_notice_days")]
    pub formal_notice_days: i64,

    #[serde(default = "default_breach_notice_days")]
    pub breach_notice_days: i64,

    #[serde(default = "default_payment_plan_days")]
    pub payment_plan_days: i64,

    #[serde(default = "default_tribunal_days")]
    pub tribunal_days: i64,
}

impl WorkflowConfig {
    /// Domain view of these settings
    pub fn settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            auto_approve_threshold_cents: self.auto_approve_threshold_cents,
            ladder: ArrearsLadder {
                friendly_reminder_days: self.friendly_reminder_days,
                formal_notice_days: self.formal_notice_days,
                breach_notice_days: self.breach_notice_days,
                payment_plan_days: self.payment_plan_days,
                tribunal_days: self.tribunal_days,
            },
        }
    }

    /// Validate workflow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.auto_approve_threshold_cents < 0 {
            return Err(ValidationError::MissingRequired(
                "WORKFLOW__AUTO_APPROVE_THRESHOLD_CENTS",
            ));
        }

        if !self.settings().ladder.is_ordered() {
            return Err(ValidationError::InvalidArrearsLadder);
        }

        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            auto_approve_threshold_cents: default_auto_approve_threshold(),
            friendly_reminder_days: default_friendly_reminder_days(),
            formal_notice_days: default_formal_notice_days(),
            breach_notice_days: default_breach_notice_days(),
            payment_plan_days: default_payment_plan_days(),
            tribunal_days: default_tribunal_days(),
        }
    }
}

fn default_auto_approve_threshold() -> i64 {
    50_000
}

fn default_friendly_reminder_days() -> i64 {
    1
}

fn default_formal_notice_days() -> i64 {
    7
}

fn default_breach_notice_days() -> i64 {
    14
}

fn default_payment_plan_days() -> i64 {
    21
}

fn default_tribunal_days() -> i64 {
    28
}
