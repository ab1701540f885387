//! Sender resolution and guard rejections.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{persona_for, EmailContextType, EmailPersona, RecipientType, SenderPolicy};
use crate::domain::foundation::{ActorId, ActorRole};

/// Reasons the email guard refuses a send.
///
/// Every variant is a hard rejection; nothing is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailGuardError {
    #[error("Invalid parameter 'context_type': unknown email context '{0}'")]
    UnknownContext(String),

    #[error("Email context '{0}' requires an acting user")]
    ActorRequired(EmailContextType),

    #[error("Email context '{context}' is forbidden for a {role}")]
    SenderRoleNotAllowed {
        context: EmailContextType,
        role: ActorRole,
    },

    #[error("Missing required parameter: recipient_type (email context '{0}' allows several)")]
    RecipientTypeRequired(EmailContextType),

    #[error("Invalid parameter 'to': '{0}' is not an email address")]
    InvalidAddress(String),

    #[error("Invalid parameter 'recipient_type': '{recipient}' is not allowed for email context '{context}'")]
    RecipientTypeNotAllowed {
        context: EmailContextType,
        recipient: String,
    },

    #[error("Recipient not authorized: {address} is not a {recipient_type} you can contact ({reason})")]
    RecipientNotAuthorized {
        address: String,
        recipient_type: RecipientType,
        reason: String,
    },

    #[error("Recipient lookup failed: {0}")]
    DirectoryUnavailable(String),
}

/// The platform's own sending identity and persona mail domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub system_from_email: String,
    pub system_from_name: String,
    pub persona_domain: String,
}

/// Resolved "from" identity for one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSender {
    pub from_address: String,
    pub from_name: String,
    pub persona: Option<EmailPersona>,
}

/// Resolves the sender for a claimed context type.
///
/// Unknown context strings are rejected; there is no fallback to the
/// system identity. Persona contexts need an actor to key the persona on.
pub fn resolve_sender(
    context_type: &str,
    actor_id: Option<&ActorId>,
    identity: &SenderIdentity,
) -> Result<ResolvedSender, EmailGuardError> {
    let context = EmailContextType::parse(context_type)
        .ok_or_else(|| EmailGuardError::UnknownContext(context_type.to_string()))?;
    resolve_for_context(context, actor_id, identity)
}

/// Resolves the sender for an already-parsed context. System contexts
/// resolve without an actor.
pub fn resolve_for_context(
    context: EmailContextType,
    actor_id: Option<&ActorId>,
    identity: &SenderIdentity,
) -> Result<ResolvedSender, EmailGuardError> {
    let config = context.config();
    match (config.sender_policy, actor_id) {
        (SenderPolicy::Persona, Some(actor)) => {
            let persona = persona_for(actor, &identity.persona_domain);
            Ok(ResolvedSender {
                from_address: persona.address.clone(),
                from_name: persona.display_name.clone(),
                persona: Some(persona),
            })
        }
        (_, None) if config.requires_actor_scope => Err(EmailGuardError::ActorRequired(context)),
        _ => Ok(ResolvedSender {
            from_address: identity.system_from_email.clone(),
            from_name: identity.system_from_name.clone(),
            persona: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SenderIdentity {
        SenderIdentity {
            system_from_email: "noreply@rentwise.test".to_string(),
            system_from_name: "Rentwise".to_string(),
            persona_domain: "team.rentwise.test".to_string(),
        }
    }

    fn actor(id: &str) -> ActorId {
        ActorId::new(id).unwrap()
    }

    #[test]
    fn trade_quote_request_resolves_stable_persona() {
        let a = actor("owner-a");
        let first = resolve_sender("trade_quote_request", Some(&a), &identity()).unwrap();
        let second = resolve_sender("trade_quote_request", Some(&a), &identity()).unwrap();

        assert_eq!(first, second);
        assert!(first.persona.is_some());
        assert!(first.from_address.ends_with("@team.rentwise.test"));
    }

    #[test]
    fn same_actor_same_persona_across_trade_contexts() {
        let a = actor("owner-a");
        let quote = resolve_sender("trade_quote_request", Some(&a), &identity()).unwrap();
        let order = resolve_sender("trade_work_order", Some(&a), &identity()).unwrap();
        assert_eq!(quote.persona, order.persona);
    }

    #[test]
    fn system_contexts_use_no_reply() {
        let sender = resolve_sender("rent_reminder", Some(&actor("owner-a")), &identity()).unwrap();
        assert_eq!(sender.from_address, "noreply@rentwise.test");
        assert_eq!(sender.from_name, "Rentwise");
        assert!(sender.persona.is_none());
    }

    #[test]
    fn unknown_context_is_rejected_not_defaulted() {
        let err = resolve_sender("send_arbitrary_email", Some(&actor("owner-a")), &identity())
            .unwrap_err();
        assert_eq!(err, EmailGuardError::UnknownContext("send_arbitrary_email".to_string()));
    }

    #[test]
    fn missing_actor_is_rejected() {
        let err = resolve_sender("owner_to_trade", None, &identity()).unwrap_err();
        assert_eq!(err, EmailGuardError::ActorRequired(EmailContextType::OwnerToTrade));
    }

    #[test]
    fn system_context_resolves_without_actor() {
        let sender = resolve_sender("payment_receipt", None, &identity()).unwrap();
        assert_eq!(sender.from_address, "noreply@rentwise.test");
    }

    #[test]
    fn role_rejection_reads_as_forbidden() {
        let err = EmailGuardError::SenderRoleNotAllowed {
            context: EmailContextType::TradeWorkOrder,
            role: ActorRole::Tenant,
        };
        assert_eq!(
            err.to_string(),
            "Email context 'trade_work_order' is forbidden for a tenant"
        );
    }
}
