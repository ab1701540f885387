//! Email context guard.
//!
//! Every agent-originated email passes through [`EmailContextGuard::authorize`]
//! before a provider sees it. The guard checks, in order:
//!
//! 1. the context type is on the compiled-in allowlist
//! 2. an acting user is present and their role may use the context
//! 3. the recipient type is allowed for the context
//! 4. the recipient has a real relationship with the acting user, or is
//!    the actor's own address for self-addressed contexts
//!
//! and then resolves the sender identity. Any failure is a hard rejection.

use std::sync::Arc;

use crate::domain::email::{
    resolve_for_context, EmailContextType, EmailGuardError, RecipientType, ResolvedSender,
    SenderIdentity,
};
use crate::domain::foundation::{ActorId, ActorRole, DomainError};
use crate::ports::RecipientDirectory;

/// What the caller claims about an email.
#[derive(Debug, Clone, Copy)]
pub struct EmailRequest<'a> {
    pub context_type: &'a str,
    pub recipient_type: Option<&'a str>,
    pub to: &'a str,
}

/// An email the guard has cleared for sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedEmail {
    pub context: EmailContextType,
    pub recipient_type: RecipientType,
    /// Trimmed, lower-cased recipient address.
    pub to: String,
    pub sender: ResolvedSender,
}

pub struct EmailContextGuard {
    identity: SenderIdentity,
    directory: Arc<dyn RecipientDirectory>,
}

impl EmailContextGuard {
    pub fn new(identity: SenderIdentity, directory: Arc<dyn RecipientDirectory>) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Authorizes one email for `actor` acting in `role`.
    pub async fn authorize(
        &self,
        request: EmailRequest<'_>,
        actor: Option<&ActorId>,
        role: ActorRole,
    ) -> Result<AuthorizedEmail, EmailGuardError> {
        let context = EmailContextType::parse(request.context_type)
            .ok_or_else(|| EmailGuardError::UnknownContext(request.context_type.to_string()))?;
        let config = context.config();

        let actor = actor.ok_or(EmailGuardError::ActorRequired(context))?;
        if !context.sendable_by(role) {
            tracing::warn!(
                actor_id = %actor,
                role = %role,
                context = %context,
                "Email context rejected for role"
            );
            return Err(EmailGuardError::SenderRoleNotAllowed { context, role });
        }

        let recipient_type = recipient_type_for(context, request.recipient_type)?;

        let to = request.to.trim().to_lowercase();
        if !looks_like_address(&to) {
            return Err(EmailGuardError::InvalidAddress(request.to.to_string()));
        }

        if config.requires_recipient_validation {
            self.verify_recipient(actor, role, recipient_type, &to).await?;
        } else if !self.is_own_address(actor, &to).await? {
            return Err(EmailGuardError::RecipientNotAuthorized {
                address: to,
                recipient_type,
                reason: unrelated_reason(role, RecipientType::SelfAddress).to_string(),
            });
        }

        let sender = resolve_for_context(context, Some(actor), &self.identity)?;

        tracing::debug!(
            context = %context,
            recipient_type = %recipient_type,
            persona = sender.persona.is_some(),
            "Email authorized"
        );

        Ok(AuthorizedEmail {
            context,
            recipient_type,
            to,
            sender,
        })
    }

    async fn verify_recipient(
        &self,
        actor: &ActorId,
        role: ActorRole,
        recipient_type: RecipientType,
        to: &str,
    ) -> Result<(), EmailGuardError> {
        let dir = &self.directory;

        let authorized = match (role, recipient_type) {
            (ActorRole::Owner, RecipientType::Tenant) => {
                lookup(dir.is_tenant_of_owner(actor, to).await)?
            }
            (ActorRole::Owner, RecipientType::Trade) => {
                lookup(dir.is_trade_in_network(actor, to).await)?
                    || lookup(dir.is_trade_on_active_job(actor, to).await)?
            }
            (ActorRole::Tenant, RecipientType::Trade) => {
                lookup(dir.is_trade_on_tenant_work_order(actor, to).await)?
            }
            (ActorRole::Tenant, RecipientType::Owner) => {
                lookup(dir.is_owner_of_tenant_property(actor, to).await)?
            }
            (_, RecipientType::SelfAddress) => self.is_own_address(actor, to).await?,
            (ActorRole::Owner, RecipientType::Owner) | (ActorRole::Tenant, RecipientType::Tenant) => {
                return Err(EmailGuardError::RecipientNotAuthorized {
                    address: to.to_string(),
                    recipient_type,
                    reason: format!("a {} cannot email another {}", role, recipient_type),
                });
            }
        };

        if authorized {
            Ok(())
        } else {
            tracing::warn!(
                actor_id = %actor,
                recipient_type = %recipient_type,
                "Email recipient rejected"
            );
            Err(EmailGuardError::RecipientNotAuthorized {
                address: to.to_string(),
                recipient_type,
                reason: unrelated_reason(role, recipient_type).to_string(),
            })
        }
    }

    async fn is_own_address(&self, actor: &ActorId, to: &str) -> Result<bool, EmailGuardError> {
        Ok(lookup(self.directory.actor_email(actor).await)?
            .map_or(false, |own| own.trim().eq_ignore_ascii_case(to)))
    }
}

/// Picks the recipient type, inferring it when the context allows only one.
fn recipient_type_for(
    context: EmailContextType,
    claimed: Option<&str>,
) -> Result<RecipientType, EmailGuardError> {
    let allowed = context.config().allowed_recipient_types;

    let recipient_type = match claimed {
        Some(s) => RecipientType::parse(s).ok_or_else(|| EmailGuardError::RecipientTypeNotAllowed {
            context,
            recipient: s.to_string(),
        })?,
        None => match allowed {
            [only] => *only,
            _ => return Err(EmailGuardError::RecipientTypeRequired(context)),
        },
    };

    if context.allows(recipient_type) {
        Ok(recipient_type)
    } else {
        Err(EmailGuardError::RecipientTypeNotAllowed {
            context,
            recipient: recipient_type.to_string(),
        })
    }
}

fn lookup<T>(result: Result<T, DomainError>) -> Result<T, EmailGuardError> {
    result.map_err(|e| EmailGuardError::DirectoryUnavailable(e.message))
}

fn looks_like_address(to: &str) -> bool {
    match to.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !to.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}

fn unrelated_reason(role: ActorRole, recipient_type: RecipientType) -> &'static str {
    match (role, recipient_type) {
        (ActorRole::Owner, RecipientType::Tenant) => "not a tenant on any of your properties",
        (ActorRole::Owner, RecipientType::Trade) => {
            "not in your trade network or assigned to one of your jobs"
        }
        (ActorRole::Tenant, RecipientType::Trade) => {
            "not assigned to an open work order at your rental"
        }
        (ActorRole::Tenant, RecipientType::Owner) => "not the owner of your rental",
        (_, RecipientType::SelfAddress) => "not your account address",
        _ => "no relationship on record",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRecipientDirectory;

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

    fn request<'a>(context: &'a str, to: &'a str) -> EmailRequest<'a> {
        EmailRequest {
            context_type: context,
            recipient_type: None,
            to,
        }
    }

    async fn guard() -> EmailContextGuard {
        let owner = actor("owner-a");
        let tenant = actor("tenant-a");
        let directory = InMemoryRecipientDirectory::new()
            .with_tenancy(&owner, "owner@example.com", &tenant, "tenant@example.com")
            .await
            .with_network_trade(&owner, "sparky@example.com")
            .await
            .with_active_job(&owner, Some(&tenant), "plumber@example.com")
            .await
            .with_actor_email(&owner, "owner@example.com")
            .await;
        EmailContextGuard::new(identity(), Arc::new(directory))
    }

    #[tokio::test]
    async fn unknown_context_is_rejected_first() {
        let guard = guard().await;
        let err = guard
            .authorize(request("marketing_blast", "not an address"), None, ActorRole::Owner)
            .await
            .unwrap_err();
        assert_eq!(err, EmailGuardError::UnknownContext("marketing_blast".to_string()));
    }

    #[tokio::test]
    async fn owner_can_remind_own_tenant() {
        let guard = guard().await;
        let owner = actor("owner-a");

        let ok = guard
            .authorize(request("rent_reminder", " Tenant@Example.com "), Some(&owner), ActorRole::Owner)
            .await
            .unwrap();

        assert_eq!(ok.recipient_type, RecipientType::Tenant);
        assert_eq!(ok.to, "tenant@example.com");
        assert_eq!(ok.sender.from_address, "noreply@rentwise.test");
    }

    #[tokio::test]
    async fn other_owner_cannot_email_the_tenant() {
        let guard = guard().await;
        let stranger = actor("owner-b");

        let err = guard
            .authorize(request("rent_reminder", "tenant@example.com"), Some(&stranger), ActorRole::Owner)
            .await
            .unwrap_err();

        assert!(matches!(err, EmailGuardError::RecipientNotAuthorized { .. }));
    }

    #[tokio::test]
    async fn owner_trade_email_uses_persona() {
        let guard = guard().await;
        let owner = actor("owner-a");

        let network = guard
            .authorize(request("trade_quote_request", "sparky@example.com"), Some(&owner), ActorRole::Owner)
            .await
            .unwrap();
        let on_job = guard
            .authorize(request("owner_to_trade", "plumber@example.com"), Some(&owner), ActorRole::Owner)
            .await
            .unwrap();

        assert!(network.sender.persona.is_some());
        assert!(network.sender.from_address.ends_with("@team.rentwise.test"));
        assert_eq!(network.sender, on_job.sender);
    }

    #[tokio::test]
    async fn tenant_can_only_reach_trade_on_their_work_order() {
        let guard = guard().await;
        let tenant = actor("tenant-a");

        assert!(guard
            .authorize(request("tenant_to_trade", "plumber@example.com"), Some(&tenant), ActorRole::Tenant)
            .await
            .is_ok());

        let err = guard
            .authorize(request("tenant_to_trade", "sparky@example.com"), Some(&tenant), ActorRole::Tenant)
            .await
            .unwrap_err();
        assert!(matches!(err, EmailGuardError::RecipientNotAuthorized { .. }));
    }

    #[tokio::test]
    async fn maintenance_update_needs_explicit_recipient_type() {
        let guard = guard().await;
        let tenant = actor("tenant-a");

        let err = guard
            .authorize(request("maintenance_update", "owner@example.com"), Some(&tenant), ActorRole::Tenant)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EmailGuardError::RecipientTypeRequired(EmailContextType::MaintenanceUpdate)
        );

        let ok = guard
            .authorize(
                EmailRequest {
                    context_type: "maintenance_update",
                    recipient_type: Some("owner"),
                    to: "owner@example.com",
                },
                Some(&tenant),
                ActorRole::Tenant,
            )
            .await
            .unwrap();
        assert_eq!(ok.recipient_type, RecipientType::Owner);
    }

    #[tokio::test]
    async fn recipient_type_outside_context_is_rejected() {
        let guard = guard().await;
        let owner = actor("owner-a");

        let err = guard
            .authorize(
                EmailRequest {
                    context_type: "rent_reminder",
                    recipient_type: Some("trade"),
                    to: "sparky@example.com",
                },
                Some(&owner),
                ActorRole::Owner,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EmailGuardError::RecipientTypeNotAllowed { .. }));
    }

    #[tokio::test]
    async fn owner_report_goes_only_to_self() {
        let guard = guard().await;
        let owner = actor("owner-a");

        assert!(guard
            .authorize(request("owner_report", "OWNER@example.com"), Some(&owner), ActorRole::Owner)
            .await
            .is_ok());
        assert!(guard
            .authorize(request("owner_report", "someone@example.com"), Some(&owner), ActorRole::Owner)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn missing_actor_is_rejected() {
        let guard = guard().await;
        let err = guard
            .authorize(request("rent_reminder", "tenant@example.com"), None, ActorRole::Owner)
            .await
            .unwrap_err();
        assert_eq!(err, EmailGuardError::ActorRequired(EmailContextType::RentReminder));
    }

    #[tokio::test]
    async fn tenant_cannot_send_owner_persona_mail() {
        let guard = guard().await;
        let tenant = actor("tenant-a");

        // The trade is on the tenant's own work order, so only the role
        // policy stands between the tenant and the owner's persona.
        for context in ["trade_work_order", "trade_quote_request", "owner_to_trade"] {
            let err = guard
                .authorize(request(context, "plumber@example.com"), Some(&tenant), ActorRole::Tenant)
                .await
                .unwrap_err();
            assert!(
                matches!(err, EmailGuardError::SenderRoleNotAllowed { role: ActorRole::Tenant, .. }),
                "{}: {:?}",
                context,
                err
            );
        }
    }

    #[tokio::test]
    async fn role_is_checked_before_recipient() {
        let guard = guard().await;
        let tenant = actor("tenant-a");

        let err = guard
            .authorize(
                EmailRequest {
                    context_type: "breach_notice",
                    recipient_type: Some("trade"),
                    to: "not an address",
                },
                Some(&tenant),
                ActorRole::Tenant,
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EmailGuardError::SenderRoleNotAllowed {
                context: EmailContextType::BreachNotice,
                role: ActorRole::Tenant,
            }
        );
    }

    #[tokio::test]
    async fn owner_cannot_use_tenant_to_trade() {
        let guard = guard().await;
        let owner = actor("owner-a");

        let err = guard
            .authorize(request("tenant_to_trade", "plumber@example.com"), Some(&owner), ActorRole::Owner)
            .await
            .unwrap_err();
        assert!(matches!(err, EmailGuardError::SenderRoleNotAllowed { .. }));
    }

    #[tokio::test]
    async fn owner_report_rejects_address_of_known_tenant() {
        let guard = guard().await;
        let owner = actor("owner-a");

        let err = guard
            .authorize(request("owner_report", "tenant@example.com"), Some(&owner), ActorRole::Owner)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EmailGuardError::RecipientNotAuthorized { recipient_type: RecipientType::SelfAddress, .. }
        ));
    }

    #[tokio::test]
    async fn malformed_address_is_rejected() {
        let guard = guard().await;
        let owner = actor("owner-a");
        let err = guard
            .authorize(request("rent_reminder", "tenant-at-example"), Some(&owner), ActorRole::Owner)
            .await
            .unwrap_err();
        assert!(matches!(err, EmailGuardError::InvalidAddress(_)));
    }

    #[test]
    fn address_shape() {
        assert!(looks_like_address("a@b.co"));
        assert!(!looks_like_address("@b.co"));
        assert!(!looks_like_address("a@b"));
        assert!(!looks_like_address("a b@c.com"));
        assert!(!looks_like_address("a@b@c.com"));
    }
}
