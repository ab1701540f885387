//! Email context allowlist.
//!
//! Every agent-originated email declares a context type. The set of types
//! and each type's policy are compiled in; there is no way for a caller,
//! user, or model to add an entry at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ActorRole;

/// Identity an email is sent under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderPolicy {
    /// The platform's no-reply identity.
    System,
    /// A named persona scoped to the acting owner.
    Persona,
}

/// Who may receive an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    Tenant,
    Owner,
    Trade,
    /// The acting actor's own address.
    #[serde(rename = "self")]
    SelfAddress,
}

impl RecipientType {
    /// Parses the wire name. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tenant" => Some(RecipientType::Tenant),
            "owner" => Some(RecipientType::Owner),
            "trade" => Some(RecipientType::Trade),
            "self" => Some(RecipientType::SelfAddress),
            _ => None,
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientType::Tenant => "tenant",
            RecipientType::Owner => "owner",
            RecipientType::Trade => "trade",
            RecipientType::SelfAddress => "self",
        }
    }
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy for one context type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailContextConfig {
    pub sender_policy: SenderPolicy,
    /// The sender identity is derived from the acting user.
    pub requires_actor_scope: bool,
    /// The recipient must have a relationship with the acting user on
    /// record. When false the only acceptable recipient is the actor's own
    /// account address.
    pub requires_recipient_validation: bool,
    /// Roles allowed to send under this context.
    pub allowed_sender_roles: &'static [ActorRole],
    pub allowed_recipient_types: &'static [RecipientType],
}

const TENANT_ONLY: &[RecipientType] = &[RecipientType::Tenant];
const TRADE_ONLY: &[RecipientType] = &[RecipientType::Trade];
const TENANT_OR_OWNER: &[RecipientType] = &[RecipientType::Tenant, RecipientType::Owner];
const SELF_ONLY: &[RecipientType] = &[RecipientType::SelfAddress];

const OWNERS: &[ActorRole] = &[ActorRole::Owner];
const TENANTS: &[ActorRole] = &[ActorRole::Tenant];
const OWNERS_AND_TENANTS: &[ActorRole] = &[ActorRole::Owner, ActorRole::Tenant];

/// Closed set of legitimate purposes for an outbound email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailContextType {
    RentReminder,
    ArrearsNotice,
    BreachNotice,
    PaymentReceipt,
    LeaseRenewal,
    InspectionNotice,
    MaintenanceUpdate,
    TenantWelcome,
    TradeQuoteRequest,
    TradeWorkOrder,
    OwnerToTrade,
    TenantToTrade,
    OwnerReport,
}

impl EmailContextType {
    /// Every allowed context type.
    pub const ALL: &'static [EmailContextType] = &[
        EmailContextType::RentReminder,
        EmailContextType::ArrearsNotice,
        EmailContextType::BreachNotice,
        EmailContextType::PaymentReceipt,
        EmailContextType::LeaseRenewal,
        EmailContextType::InspectionNotice,
        EmailContextType::MaintenanceUpdate,
        EmailContextType::TenantWelcome,
        EmailContextType::TradeQuoteRequest,
        EmailContextType::TradeWorkOrder,
        EmailContextType::OwnerToTrade,
        EmailContextType::TenantToTrade,
        EmailContextType::OwnerReport,
    ];

    /// Parses a claimed context type. Total: anything unknown is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailContextType::RentReminder => "rent_reminder",
            EmailContextType::ArrearsNotice => "arrears_notice",
            EmailContextType::BreachNotice => "breach_notice",
            EmailContextType::PaymentReceipt => "payment_receipt",
            EmailContextType::LeaseRenewal => "lease_renewal",
            EmailContextType::InspectionNotice => "inspection_notice",
            EmailContextType::MaintenanceUpdate => "maintenance_update",
            EmailContextType::TenantWelcome => "tenant_welcome",
            EmailContextType::TradeQuoteRequest => "trade_quote_request",
            EmailContextType::TradeWorkOrder => "trade_work_order",
            EmailContextType::OwnerToTrade => "owner_to_trade",
            EmailContextType::TenantToTrade => "tenant_to_trade",
            EmailContextType::OwnerReport => "owner_report",
        }
    }

    /// The compiled-in policy for this context.
    pub fn config(&self) -> EmailContextConfig {
        use EmailContextType::*;

        let (sender_policy, allowed_sender_roles, allowed_recipient_types) = match self {
            RentReminder | ArrearsNotice | BreachNotice | PaymentReceipt | LeaseRenewal
            | InspectionNotice | TenantWelcome => (SenderPolicy::System, OWNERS, TENANT_ONLY),
            MaintenanceUpdate => (SenderPolicy::System, OWNERS_AND_TENANTS, TENANT_OR_OWNER),
            TradeQuoteRequest | TradeWorkOrder | OwnerToTrade => {
                (SenderPolicy::Persona, OWNERS, TRADE_ONLY)
            }
            TenantToTrade => (SenderPolicy::System, TENANTS, TRADE_ONLY),
            OwnerReport => (SenderPolicy::System, OWNERS, SELF_ONLY),
        };

        EmailContextConfig {
            sender_policy,
            requires_actor_scope: sender_policy == SenderPolicy::Persona,
            requires_recipient_validation: allowed_recipient_types != SELF_ONLY,
            allowed_sender_roles,
            allowed_recipient_types,
        }
    }

    /// Returns true if `recipient` is in this context's allowed set.
    pub fn allows(&self, recipient: RecipientType) -> bool {
        self.config().allowed_recipient_types.contains(&recipient)
    }

    /// Returns true if an actor in `role` may send under this context.
    pub fn sendable_by(&self, role: ActorRole) -> bool {
        self.config().allowed_sender_roles.contains(&role)
    }
}

impl fmt::Display for EmailContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns true if `context_type` names an allowed context.
pub fn is_valid_context(context_type: &str) -> bool {
    EmailContextType::parse(context_type).is_some()
}

/// Looks up the policy for a claimed context type.
pub fn context_config(context_type: &str) -> Option<EmailContextConfig> {
    EmailContextType::parse(context_type).map(|c| c.config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_is_valid() {
        for ctx in EmailContextType::ALL {
            assert!(is_valid_context(ctx.as_str()));
        }
        assert_eq!(EmailContextType::ALL.len(), 13);
    }

    #[test]
    fn unknown_types_are_invalid() {
        assert!(!is_valid_context("not_a_real_type"));
        assert!(!is_valid_context("send_arbitrary_email"));
        assert!(!is_valid_context(""));
        assert!(!is_valid_context("RENT_REMINDER"));
        assert!(context_config("marketing_blast").is_none());
    }

    #[test]
    fn trade_contexts_use_persona() {
        assert_eq!(
            EmailContextType::TradeQuoteRequest.config().sender_policy,
            SenderPolicy::Persona
        );
        assert_eq!(EmailContextType::OwnerToTrade.config().sender_policy, SenderPolicy::Persona);
        assert_eq!(EmailContextType::RentReminder.config().sender_policy, SenderPolicy::System);
    }

    #[test]
    fn tenant_to_trade_sends_as_system() {
        let config = EmailContextType::TenantToTrade.config();
        assert_eq!(config.sender_policy, SenderPolicy::System);
        assert_eq!(config.allowed_recipient_types, &[RecipientType::Trade]);
    }

    #[test]
    fn recipient_sets_are_enforced() {
        assert!(EmailContextType::ArrearsNotice.allows(RecipientType::Tenant));
        assert!(!EmailContextType::ArrearsNotice.allows(RecipientType::Trade));
        assert!(EmailContextType::OwnerReport.allows(RecipientType::SelfAddress));
        assert!(!EmailContextType::OwnerReport.allows(RecipientType::Tenant));
    }

    #[test]
    fn sender_roles_are_enforced() {
        for ctx in [
            EmailContextType::TradeWorkOrder,
            EmailContextType::TradeQuoteRequest,
            EmailContextType::OwnerToTrade,
            EmailContextType::BreachNotice,
            EmailContextType::OwnerReport,
        ] {
            assert!(ctx.sendable_by(ActorRole::Owner), "{}", ctx);
            assert!(!ctx.sendable_by(ActorRole::Tenant), "{}", ctx);
        }
        assert!(EmailContextType::TenantToTrade.sendable_by(ActorRole::Tenant));
        assert!(!EmailContextType::TenantToTrade.sendable_by(ActorRole::Owner));
        assert!(EmailContextType::MaintenanceUpdate.sendable_by(ActorRole::Owner));
        assert!(EmailContextType::MaintenanceUpdate.sendable_by(ActorRole::Tenant));
    }

    #[test]
    fn every_context_has_a_sender_role() {
        for ctx in EmailContextType::ALL {
            assert!(!ctx.config().allowed_sender_roles.is_empty(), "{}", ctx);
        }
    }

    #[test]
    fn only_persona_contexts_are_actor_scoped() {
        for ctx in EmailContextType::ALL {
            let config = ctx.config();
            assert_eq!(
                config.requires_actor_scope,
                config.sender_policy == SenderPolicy::Persona,
                "{}",
                ctx
            );
        }
        assert!(!EmailContextType::RentReminder.config().requires_actor_scope);
    }

    #[test]
    fn only_self_addressed_mail_skips_relationship_checks() {
        assert!(!EmailContextType::OwnerReport.config().requires_recipient_validation);
        for ctx in EmailContextType::ALL.iter().filter(|c| **c != EmailContextType::OwnerReport) {
            assert!(ctx.config().requires_recipient_validation, "{}", ctx);
        }
    }

    #[test]
    fn recipient_type_parses_self() {
        assert_eq!(RecipientType::parse("self"), Some(RecipientType::SelfAddress));
        assert_eq!(serde_json::to_string(&RecipientType::SelfAddress).unwrap(), "\"self\"");
        assert_eq!(RecipientType::parse("landlord"), None);
    }

    #[test]
    fn context_type_serde_matches_as_str() {
        for ctx in EmailContextType::ALL {
            assert_eq!(serde_json::to_string(ctx).unwrap(), format!("\"{}\"", ctx.as_str()));
        }
    }
}
