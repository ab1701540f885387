//! Arrears escalation ladder.
//!
//! Rungs are climbed in order as the debt ages. Before recommending a rung
//! the ladder checks which rungs the logged actions already cover, so the
//! same step is never suggested twice.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the arrears ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrearsRung {
    FriendlyReminder,
    FormalNotice,
    BreachNotice,
    PaymentPlanOffer,
    TribunalPreparation,
}

impl ArrearsRung {
    /// Rungs from first to last.
    pub const ALL: &'static [ArrearsRung] = &[
        ArrearsRung::FriendlyReminder,
        ArrearsRung::FormalNotice,
        ArrearsRung::BreachNotice,
        ArrearsRung::PaymentPlanOffer,
        ArrearsRung::TribunalPreparation,
    ];

    /// Returns the action type logged for this rung.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrearsRung::FriendlyReminder => "friendly_reminder",
            ArrearsRung::FormalNotice => "formal_notice",
            ArrearsRung::BreachNotice => "breach_notice",
            ArrearsRung::PaymentPlanOffer => "payment_plan_offer",
            ArrearsRung::TribunalPreparation => "tribunal_preparation",
        }
    }

    /// Matches a logged action type to a rung, ignoring case and spacing.
    pub fn from_action(action_type: &str) -> Option<Self> {
        let normalized = action_type.trim().to_lowercase().replace(&[' ', '-'][..], "_");
        Self::ALL.iter().copied().find(|r| r.as_str() == normalized)
    }
}

impl fmt::Display for ArrearsRung {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day-overdue thresholds at which each rung becomes eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsLadder {
    pub friendly_reminder_days: i64,
    pub formal_notice_days: i64,
    pub breach_notice_days: i64,
    pub payment_plan_days: i64,
    pub tribunal_days: i64,
}

impl Default for ArrearsLadder {
    fn default() -> Self {
        Self {
            friendly_reminder_days: 1,
            formal_notice_days: 7,
            breach_notice_days: 14,
            payment_plan_days: 21,
            tribunal_days: 28,
        }
    }
}

/// Where a tenancy sits on the ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LadderPosition {
    /// Nothing is owed, or it is not yet overdue.
    NotOverdue,
    /// Take this rung now.
    Recommend {
        rung: ArrearsRung,
        /// Lower eligible rungs that were never executed.
        skipped: Vec<ArrearsRung>,
    },
    /// Everything eligible is done; the next rung opens later.
    Wait {
        next: ArrearsRung,
        eligible_at_day: i64,
    },
    /// Every rung has been executed.
    Exhausted,
}

impl ArrearsLadder {
    /// Day threshold for a rung.
    pub fn threshold(&self, rung: ArrearsRung) -> i64 {
        match rung {
            ArrearsRung::FriendlyReminder => self.friendly_reminder_days,
            ArrearsRung::FormalNotice => self.formal_notice_days,
            ArrearsRung::BreachNotice => self.breach_notice_days,
            ArrearsRung::PaymentPlanOffer => self.payment_plan_days,
            ArrearsRung::TribunalPreparation => self.tribunal_days,
        }
    }

    /// Thresholds must be positive and strictly increasing.
    pub fn is_ordered(&self) -> bool {
        let days: Vec<i64> = ArrearsRung::ALL.iter().map(|r| self.threshold(*r)).collect();
        days[0] > 0 && days.windows(2).all(|w| w[0] < w[1])
    }

    /// Rungs whose threshold `days_overdue` has reached.
    pub fn eligible(&self, days_overdue: i64) -> Vec<ArrearsRung> {
        ArrearsRung::ALL
            .iter()
            .copied()
            .filter(|r| days_overdue >= self.threshold(*r))
            .collect()
    }

    /// Decides the next rung from days overdue and logged action types.
    ///
    /// The recommendation is the highest eligible rung that is above every
    /// rung already executed. Lower rungs are never recommended after a
    /// higher one has been taken.
    pub fn position<S: AsRef<str>>(&self, days_overdue: i64, prior_actions: &[S]) -> LadderPosition {
        let done: Vec<ArrearsRung> = prior_actions
            .iter()
            .filter_map(|a| ArrearsRung::from_action(a.as_ref()))
            .collect();
        let highest_done = done.iter().max().copied();

        if highest_done == Some(ArrearsRung::TribunalPreparation) {
            return LadderPosition::Exhausted;
        }

        let eligible = self.eligible(days_overdue);
        if eligible.is_empty() && highest_done.is_none() {
            return LadderPosition::NotOverdue;
        }

        let open: Vec<ArrearsRung> = eligible
            .iter()
            .copied()
            .filter(|r| highest_done.map_or(true, |h| *r > h))
            .collect();

        match open.last() {
            Some(rung) => LadderPosition::Recommend {
                rung: *rung,
                skipped: open[..open.len() - 1]
                    .iter()
                    .copied()
                    .filter(|r| !done.contains(r))
                    .collect(),
            },
            None => {
                let floor = highest_done.or_else(|| eligible.last().copied());
                let next = ArrearsRung::ALL
                    .iter()
                    .copied()
                    .find(|r| floor.map_or(true, |f| *r > f));
                match next {
                    Some(next) => LadderPosition::Wait {
                        next,
                        eligible_at_day: self.threshold(next),
                    },
                    None => LadderPosition::Exhausted,
                }
            }
        }
    }
}
