//! PostgreSQL implementation of WorkflowStateReader.
//!
//! The root entity of every snapshot is loaded with an owner filter first.
//! Child rows are only read once ownership is established.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::property_reader::row_to_property;
use super::{column, query_error};
use crate::domain::foundation::{ActorId, DomainError, Timestamp};
use crate::domain::workflow::{
    ApplicationSnapshot, ArrearsAction, ArrearsSnapshot, ArrearsState, EndTenancyState,
    FindTenantState, ListingSnapshot, MaintenanceSnapshot, MaintenanceState, OnboardTenantState,
    PropertySnapshot, TenancySnapshot,
};
use crate::ports::WorkflowStateReader;

const TENANCY_COLUMNS: &str = "t.id, t.property_id, t.status, \
     t.start_date::text AS start_date, t.end_date::text AS end_date, t.weekly_rent_cents";

/// PostgreSQL implementation of WorkflowStateReader.
#[derive(Clone)]
pub struct PostgresWorkflowStateReader {
    pool: PgPool,
}

impl PostgresWorkflowStateReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn owned_property(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<PropertySnapshot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, address, status, weekly_rent_cents
            FROM properties
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(property_id)
        .bind(owner_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("fetch property"))?;

        row.as_ref().map(row_to_property).transpose()
    }

    /// Tenancy plus its property, both only if the owner owns the property.
    async fn owned_tenancy(
        &self,
        owner_id: &ActorId,
        tenancy_id: &str,
    ) -> Result<Option<(TenancySnapshot, PropertySnapshot)>, DomainError> {
        let sql = format!(
            r#"
            SELECT {},
                   p.owner_id, p.address, p.status AS property_status,
                   p.weekly_rent_cents AS property_rent_cents
            FROM tenancies t
            JOIN properties p ON p.id = t.property_id
            WHERE t.id = $1 AND p.owner_id = $2
            "#,
            TENANCY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(tenancy_id)
            .bind(owner_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("fetch tenancy"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let owner: String = column(&row, "owner_id")?;
        let property = PropertySnapshot {
            id: column(&row, "property_id")?,
            owner_id: ActorId::new(owner).map_err(DomainError::from)?,
            address: column(&row, "address")?,
            status: column(&row, "property_status")?,
            weekly_rent_cents: column(&row, "property_rent_cents")?,
        };
        let tenancy = self.with_tenants(&row).await?;

        Ok(Some((tenancy, property)))
    }

    async fn with_tenants(&self, row: &PgRow) -> Result<TenancySnapshot, DomainError> {
        let id: String = column(row, "id")?;

        let emails = sqlx::query(
            "SELECT email FROM tenancy_tenants WHERE tenancy_id = $1 ORDER BY email",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error("fetch tenancy tenants"))?;

        Ok(TenancySnapshot {
            id,
            property_id: column(row, "property_id")?,
            status: column(row, "status")?,
            start_date: column(row, "start_date")?,
            end_date: column(row, "end_date")?,
            weekly_rent_cents: column(row, "weekly_rent_cents")?,
            tenant_emails: emails
                .iter()
                .map(|r| column(r, "email"))
                .collect::<Result<_, _>>()?,
        })
    }

    async fn shortlisted(&self, property_id: &str) -> Result<Vec<ApplicationSnapshot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.applicant_name, a.applicant_email, a.status
            FROM applications a
            JOIN listings l ON l.id = a.listing_id
            WHERE l.property_id = $1 AND a.status = 'shortlisted'
            ORDER BY a.created_at
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error("fetch shortlisted applications"))?;

        rows.iter()
            .map(|row| {
                Ok(ApplicationSnapshot {
                    id: column(row, "id")?,
                    applicant_name: column(row, "applicant_name")?,
                    applicant_email: column(row, "applicant_email")?,
                    status: column(row, "status")?,
                })
            })
            .collect()
    }

    async fn active_listing(&self, property_id: &str) -> Result<Option<ListingSnapshot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT l.id, l.status, l.weekly_rent_cents,
                   (SELECT COUNT(*) FROM applications a WHERE a.listing_id = l.id) AS application_count
            FROM listings l
            WHERE l.property_id = $1 AND l.status <> 'closed'
            ORDER BY l.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("fetch listing"))?;

        match row {
            Some(row) => Ok(Some(ListingSnapshot {
                id: column(&row, "id")?,
                status: column(&row, "status")?,
                weekly_rent_cents: column(&row, "weekly_rent_cents")?,
                application_count: column(&row, "application_count")?,
            })),
            None => Ok(None),
        }
    }

    async fn open_arrears(&self, tenancy_id: &str) -> Result<Option<ArrearsSnapshot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, amount_cents,
                   GREATEST(CURRENT_DATE - due_date, 0)::bigint AS days_overdue
            FROM arrears_records
            WHERE tenancy_id = $1 AND status = 'open'
            ORDER BY due_date
            LIMIT 1
            "#,
        )
        .bind(tenancy_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("fetch arrears"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let id: String = column(&row, "id")?;

        let actions = sqlx::query(
            r#"
            SELECT action_type, created_at
            FROM arrears_actions
            WHERE arrears_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error("fetch arrears actions"))?;

        Ok(Some(ArrearsSnapshot {
            id,
            amount_cents: column(&row, "amount_cents")?,
            days_overdue: column(&row, "days_overdue")?,
            prior_actions: actions
                .iter()
                .map(|a| {
                    Ok(ArrearsAction {
                        action_type: column(a, "action_type")?,
                        created_at: Timestamp::from_datetime(column(a, "created_at")?),
                    })
                })
                .collect::<Result<_, DomainError>>()?,
        }))
    }
}

#[async_trait]
impl WorkflowStateReader for PostgresWorkflowStateReader {
    async fn find_tenant_state(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<FindTenantState>, DomainError> {
        let Some(property) = self.owned_property(owner_id, property_id).await? else {
            return Ok(None);
        };

        Ok(Some(FindTenantState {
            active_listing: self.active_listing(&property.id).await?,
            shortlisted: self.shortlisted(&property.id).await?,
            property,
        }))
    }

    async fn onboard_tenant_state(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<OnboardTenantState>, DomainError> {
        let Some(property) = self.owned_property(owner_id, property_id).await? else {
            return Ok(None);
        };

        let sql = format!(
            r#"
            SELECT {}
            FROM tenancies t
            WHERE t.property_id = $1 AND t.status IN ('pending', 'active')
            ORDER BY t.start_date DESC NULLS LAST
            LIMIT 1
            "#,
            TENANCY_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&property.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("fetch current tenancy"))?;

        let active_tenancy = match row {
            Some(row) => Some(self.with_tenants(&row).await?),
            None => None,
        };

        Ok(Some(OnboardTenantState {
            active_tenancy,
            shortlisted: self.shortlisted(&property.id).await?,
            property,
        }))
    }

    async fn end_tenancy_state(
        &self,
        owner_id: &ActorId,
        tenancy_id: &str,
    ) -> Result<Option<EndTenancyState>, DomainError> {
        let Some((tenancy, property)) = self.owned_tenancy(owner_id, tenancy_id).await? else {
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS open_count
            FROM maintenance_requests
            WHERE property_id = $1 AND status NOT IN ('completed', 'closed', 'cancelled')
            "#,
        )
        .bind(&property.id)
        .fetch_one(&self.pool)
        .await
        .map_err(query_error("count open maintenance"))?;

        Ok(Some(EndTenancyState {
            tenancy,
            property,
            open_maintenance_count: column(&row, "open_count")?,
        }))
    }

    async fn maintenance_state(
        &self,
        owner_id: &ActorId,
        request_id: &str,
    ) -> Result<Option<MaintenanceState>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT m.id, m.property_id, m.title, m.status, m.urgency,
                   m.estimated_cost_cents, m.assigned_trade_id,
                   (SELECT COUNT(*) FROM quotes q WHERE q.request_id = m.id) AS quote_count,
                   (SELECT MIN(q.amount_cents) FROM quotes q WHERE q.request_id = m.id) AS lowest_quote_cents
            FROM maintenance_requests m
            JOIN properties p ON p.id = m.property_id
            WHERE m.id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(request_id)
        .bind(owner_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error("fetch maintenance request"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let request = MaintenanceSnapshot {
            id: column(&row, "id")?,
            property_id: column(&row, "property_id")?,
            title: column(&row, "title")?,
            status: column(&row, "status")?,
            urgency: column(&row, "urgency")?,
            estimated_cost_cents: column(&row, "estimated_cost_cents")?,
            quote_count: column(&row, "quote_count")?,
            lowest_quote_cents: column(&row, "lowest_quote_cents")?,
            assigned_trade_id: column(&row, "assigned_trade_id")?,
        };

        let property = self
            .owned_property(owner_id, &request.property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", &request.property_id))?;

        Ok(Some(MaintenanceState { request, property }))
    }

    async fn arrears_state(
        &self,
        owner_id: &ActorId,
        tenancy_id: &str,
    ) -> Result<Option<ArrearsState>, DomainError> {
        let Some((tenancy, _property)) = self.owned_tenancy(owner_id, tenancy_id).await? else {
            return Ok(None);
        };

        let arrears = self.open_arrears(&tenancy.id).await?;
        Ok(Some(ArrearsState { tenancy, arrears }))
    }
}
