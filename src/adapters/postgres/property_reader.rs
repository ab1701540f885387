//! PostgreSQL implementation of PropertyReader.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, query_error};
use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::workflow::PropertySnapshot;
use crate::ports::PropertyReader;

/// PostgreSQL implementation of PropertyReader.
#[derive(Clone)]
pub struct PostgresPropertyReader {
    pool: PgPool,
}

impl PostgresPropertyReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) fn row_to_property(row: &PgRow) -> Result<PropertySnapshot, DomainError> {
    let owner_id: String = column(row, "owner_id")?;

    Ok(PropertySnapshot {
        id: column(row, "id")?,
        owner_id: ActorId::new(owner_id).map_err(DomainError::from)?,
        address: column(row, "address")?,
        status: column(row, "status")?,
        weekly_rent_cents: column(row, "weekly_rent_cents")?,
    })
}

#[async_trait]
impl PropertyReader for PostgresPropertyReader {
    async fn get_property(
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

    async fn list_properties(&self, owner_id: &ActorId) -> Result<Vec<PropertySnapshot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, address, status, weekly_rent_cents
            FROM properties
            WHERE owner_id = $1
            ORDER BY address
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_error("list properties"))?;

        rows.iter().map(row_to_property).collect()
    }
}
