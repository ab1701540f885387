//! Workflow State Reader Port - Minimal state for workflow planning.
//!
//! Read-only and ownership-scoped: each method returns `Ok(None)` when the
//! entity does not exist *or* belongs to someone else, so a foreign id is
//! indistinguishable from a missing one.

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::workflow::{
    ArrearsState, EndTenancyState, FindTenantState, MaintenanceState, OnboardTenantState,
};

#[async_trait]
pub trait WorkflowStateReader: Send + Sync {
    /// Property plus its live listing and shortlisted applicants.
    async fn find_tenant_state(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<FindTenantState>, DomainError>;

    /// Property plus any pending/active tenancy and shortlisted applicants.
    async fn onboard_tenant_state(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<OnboardTenantState>, DomainError>;

    /// Tenancy, its property, and open maintenance count.
    async fn end_tenancy_state(
        &self,
        owner_id: &ActorId,
        tenancy_id: &str,
    ) -> Result<Option<EndTenancyState>, DomainError>;

    /// Maintenance request with quote summary and its property.
    async fn maintenance_state(
        &self,
        owner_id: &ActorId,
        request_id: &str,
    ) -> Result<Option<MaintenanceState>, DomainError>;

    /// Tenancy plus its open arrears record and logged escalation actions.
    async fn arrears_state(
        &self,
        owner_id: &ActorId,
        tenancy_id: &str,
    ) -> Result<Option<ArrearsState>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn workflow_state_reader_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WorkflowStateReader>();
    }
}
