//! PostgreSQL implementation of RecipientDirectory.
//!
//! Each check is a single `EXISTS` query. Addresses compare case-insensitively.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{column, query_error};
use crate::domain::foundation::{ActorId, DomainError};
use crate::ports::RecipientDirectory;

/// Maintenance statuses that no longer count as an active job.
const CLOSED_JOB_STATUSES: &str = "('completed', 'closed', 'cancelled')";

/// PostgreSQL implementation of RecipientDirectory.
#[derive(Clone)]
pub struct PostgresRecipientDirectory {
    pool: PgPool,
}

impl PostgresRecipientDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(
        &self,
        sql: &str,
        actor_id: &ActorId,
        email: &str,
        action: &'static str,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(sql)
            .bind(actor_id.as_str())
            .bind(email.trim())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error(action))?;

        column(&row, "found")
    }
}

#[async_trait]
impl RecipientDirectory for PostgresRecipientDirectory {
    async fn is_tenant_of_owner(&self, owner_id: &ActorId, email: &str) -> Result<bool, DomainError> {
        self.exists(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM tenancy_tenants tt
                JOIN tenancies t ON t.id = tt.tenancy_id
                JOIN properties p ON p.id = t.property_id
                WHERE p.owner_id = $1
                  AND lower(tt.email) = lower($2)
                  AND t.status IN ('pending', 'active', 'ending')
            ) AS found
            "#,
            owner_id,
            email,
            "check tenant of owner",
        )
        .await
    }

    async fn is_trade_in_network(&self, owner_id: &ActorId, email: &str) -> Result<bool, DomainError> {
        self.exists(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM owner_trades ot
                JOIN trades tr ON tr.id = ot.trade_id
                WHERE ot.owner_id = $1
                  AND lower(tr.email) = lower($2)
            ) AS found
            "#,
            owner_id,
            email,
            "check trade network",
        )
        .await
    }

    async fn is_trade_on_active_job(
        &self,
        owner_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError> {
        self.exists(
            &format!(
                r#"
            SELECT EXISTS (
                SELECT 1
                FROM maintenance_requests m
                JOIN properties p ON p.id = m.property_id
                JOIN trades tr ON tr.id = m.assigned_trade_id
                WHERE p.owner_id = $1
                  AND lower(tr.email) = lower($2)
                  AND m.status NOT IN {}
            ) AS found
            "#,
                CLOSED_JOB_STATUSES
            ),
            owner_id,
            email,
            "check trade on active job",
        )
        .await
    }

    async fn is_trade_on_tenant_work_order(
        &self,
        tenant_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError> {
        self.exists(
            &format!(
                r#"
            SELECT EXISTS (
                SELECT 1
                FROM maintenance_requests m
                JOIN tenancies t ON t.property_id = m.property_id
                JOIN tenancy_tenants tt ON tt.tenancy_id = t.id
                JOIN trades tr ON tr.id = m.assigned_trade_id
                WHERE tt.tenant_id = $1
                  AND t.status IN ('active', 'ending')
                  AND lower(tr.email) = lower($2)
                  AND m.status NOT IN {}
            ) AS found
            "#,
                CLOSED_JOB_STATUSES
            ),
            tenant_id,
            email,
            "check trade on tenant work order",
        )
        .await
    }

    async fn is_owner_of_tenant_property(
        &self,
        tenant_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError> {
        self.exists(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM tenancy_tenants tt
                JOIN tenancies t ON t.id = tt.tenancy_id
                JOIN properties p ON p.id = t.property_id
                JOIN users u ON u.id = p.owner_id
                WHERE tt.tenant_id = $1
                  AND t.status IN ('active', 'ending')
                  AND lower(u.email) = lower($2)
            ) AS found
            "#,
            tenant_id,
            email,
            "check owner of tenant property",
        )
        .await
    }

    async fn actor_email(&self, actor_id: &ActorId) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT email FROM users WHERE id = $1")
            .bind(actor_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("load actor email"))?;

        match row {
            Some(row) => Ok(Some(column(&row, "email")?)),
            None => Ok(None),
        }
    }
}
