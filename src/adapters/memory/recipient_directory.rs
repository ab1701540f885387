//! In-memory recipient directory.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ActorId, DomainError};
use crate::ports::RecipientDirectory;

type Relations = HashMap<ActorId, HashSet<String>>;

#[derive(Debug, Default)]
struct Directory {
    tenants_of_owner: Relations,
    trade_network: Relations,
    trades_on_active_jobs: Relations,
    trades_on_tenant_orders: Relations,
    owners_of_tenant: Relations,
    actor_emails: HashMap<ActorId, String>,
}

/// Relationship table held in memory. Addresses are stored lower-cased.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipientDirectory {
    inner: Arc<RwLock<Directory>>,
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn relate(relations: &mut Relations, actor: &ActorId, email: &str) {
    relations
        .entry(actor.clone())
        .or_default()
        .insert(normalize(email));
}

fn related(relations: &Relations, actor: &ActorId, email: &str) -> bool {
    relations
        .get(actor)
        .map_or(false, |emails| emails.contains(&normalize(email)))
}

impl InMemoryRecipientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor's own account address.
    pub async fn with_actor_email(self, actor: &ActorId, email: &str) -> Self {
        self.inner
            .write()
            .await
            .actor_emails
            .insert(actor.clone(), normalize(email));
        self
    }

    /// Records `tenant_email` as renting from `owner`, with `tenant` as the
    /// tenant's actor id for the reverse lookup.
    pub async fn with_tenancy(
        self,
        owner: &ActorId,
        owner_email: &str,
        tenant: &ActorId,
        tenant_email: &str,
    ) -> Self {
        {
            let mut dir = self.inner.write().await;
            relate(&mut dir.tenants_of_owner, owner, tenant_email);
            relate(&mut dir.owners_of_tenant, tenant, owner_email);
        }
        self
    }

    /// Adds a trade to the owner's saved network.
    pub async fn with_network_trade(self, owner: &ActorId, trade_email: &str) -> Self {
        relate(&mut self.inner.write().await.trade_network, owner, trade_email);
        self
    }

    /// Assigns a trade to an active job on the owner's property. When
    /// `tenant` is given the job is also an open work order on that tenant's
    /// rented property.
    pub async fn with_active_job(
        self,
        owner: &ActorId,
        tenant: Option<&ActorId>,
        trade_email: &str,
    ) -> Self {
        {
            let mut dir = self.inner.write().await;
            relate(&mut dir.trades_on_active_jobs, owner, trade_email);
            if let Some(tenant) = tenant {
                relate(&mut dir.trades_on_tenant_orders, tenant, trade_email);
            }
        }
        self
    }
}

#[async_trait]
impl RecipientDirectory for InMemoryRecipientDirectory {
    async fn is_tenant_of_owner(&self, owner_id: &ActorId, email: &str) -> Result<bool, DomainError> {
        Ok(related(&self.inner.read().await.tenants_of_owner, owner_id, email))
    }

    async fn is_trade_in_network(&self, owner_id: &ActorId, email: &str) -> Result<bool, DomainError> {
        Ok(related(&self.inner.read().await.trade_network, owner_id, email))
    }

    async fn is_trade_on_active_job(
        &self,
        owner_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError> {
        Ok(related(&self.inner.read().await.trades_on_active_jobs, owner_id, email))
    }

    async fn is_trade_on_tenant_work_order(
        &self,
        tenant_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError> {
        Ok(related(&self.inner.read().await.trades_on_tenant_orders, tenant_id, email))
    }

    async fn is_owner_of_tenant_property(
        &self,
        tenant_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError> {
        Ok(related(&self.inner.read().await.owners_of_tenant, tenant_id, email))
    }

    async fn actor_email(&self, actor_id: &ActorId) -> Result<Option<String>, DomainError> {
        Ok(self.inner.read().await.actor_emails.get(actor_id).cloned())
    }
}
