//! In-memory workflow state reader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::workflow::{
    ArrearsState, EndTenancyState, FindTenantState, MaintenanceState, OnboardTenantState,
};
use crate::ports::WorkflowStateReader;

type Keyed<T> = HashMap<(ActorId, String), T>;

#[derive(Debug, Default)]
struct States {
    find_tenant: Keyed<FindTenantState>,
    onboard_tenant: Keyed<OnboardTenantState>,
    end_tenancy: Keyed<EndTenancyState>,
    maintenance: Keyed<MaintenanceState>,
    arrears: Keyed<ArrearsState>,
}

/// Workflow snapshots keyed by `(owner, entity id)`.
///
/// Lookups by a different owner miss, the same as a foreign id in Postgres.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowStateReader {
    states: Arc<RwLock<States>>,
}

fn key(owner: &ActorId, id: &str) -> (ActorId, String) {
    (owner.clone(), id.to_string())
}

impl InMemoryWorkflowStateReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_find_tenant(&self, state: FindTenantState) {
        let k = key(&state.property.owner_id, &state.property.id);
        self.states.write().await.find_tenant.insert(k, state);
    }

    pub async fn insert_onboard_tenant(&self, state: OnboardTenantState) {
        let k = key(&state.property.owner_id, &state.property.id);
        self.states.write().await.onboard_tenant.insert(k, state);
    }

    pub async fn insert_end_tenancy(&self, state: EndTenancyState) {
        let k = key(&state.property.owner_id, &state.tenancy.id);
        self.states.write().await.end_tenancy.insert(k, state);
    }

    pub async fn insert_maintenance(&self, state: MaintenanceState) {
        let k = key(&state.property.owner_id, &state.request.id);
        self.states.write().await.maintenance.insert(k, state);
    }

    /// Arrears state carries no property, so the owner is given explicitly.
    pub async fn insert_arrears(&self, owner: &ActorId, state: ArrearsState) {
        let k = key(owner, &state.tenancy.id);
        self.states.write().await.arrears.insert(k, state);
    }
}

#[async_trait]
impl WorkflowStateReader for InMemoryWorkflowStateReader {
    async fn find_tenant_state(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<FindTenantState>, DomainError> {
        Ok(self.states.read().await.find_tenant.get(&key(owner_id, property_id)).cloned())
    }

    async fn onboard_tenant_state(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<OnboardTenantState>, DomainError> {
        Ok(self.states.read().await.onboard_tenant.get(&key(owner_id, property_id)).cloned())
    }

    async fn end_tenancy_state(
        &self,
        owner_id: &ActorId,
        tenancy_id: &str,
    ) -> Result<Option<EndTenancyState>, DomainError> {
        Ok(self.states.read().await.end_tenancy.get(&key(owner_id, tenancy_id)).cloned())
    }

    async fn maintenance_state(
        &self,
        owner_id: &ActorId,
        request_id: &str,
    ) -> Result<Option<MaintenanceState>, DomainError> {
        Ok(self.states.read().await.maintenance.get(&key(owner_id, request_id)).cloned())
    }

    async fn arrears_state(
        &self,
        owner_id: &ActorId,
        tenancy_id: &str,
    ) -> Result<Option<ArrearsState>, DomainError> {
        Ok(self.states.read().await.arrears.get(&key(owner_id, tenancy_id)).cloned())
    }
}
