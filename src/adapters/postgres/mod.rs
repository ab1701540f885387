//! PostgreSQL adapters - Database implementations for the read and memory ports.
//!
//! This module provides:
//! - `PostgresPreferenceStore` / `PostgresDecisionReader` - pgvector-backed memory
//! - `PostgresPropertyReader` - Owner-scoped property lookups
//! - `PostgresRecipientDirectory` - Relationship checks for the email guard
//! - `PostgresWorkflowStateReader` - Owner-scoped workflow snapshots
//!
//! Every query that returns business data filters by the acting actor in SQL.

mod decision_reader;
mod preference_store;
mod property_reader;
mod recipient_directory;
mod workflow_state_reader;

pub use decision_reader::PostgresDecisionReader;
pub use preference_store::PostgresPreferenceStore;
pub use property_reader::PostgresPropertyReader;
pub use recipient_directory::PostgresRecipientDirectory;
pub use workflow_state_reader::PostgresWorkflowStateReader;

use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::memory::Embedding;

/// Reads one column, mapping decode failures to a database error.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// Wraps a query error with what was being attempted.
pub(crate) fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// pgvector text literal, e.g. `[0.1,0.2,0.3]`. Bound as text and cast with `::vector`.
pub(crate) fn vector_literal(embedding: &Embedding) -> String {
    let parts: Vec<String> = embedding.as_slice().iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(","))
}

/// Parses a pgvector text literal back into an embedding.
pub(crate) fn parse_vector(text: &str) -> Result<Embedding, DomainError> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| DomainError::database(format!("Malformed vector literal: {}", text)))?;

    if inner.trim().is_empty() {
        return Ok(Embedding::normalized(Vec::new()));
    }

    let values = inner
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| DomainError::database(format!("Malformed vector literal: {}", e)))?;

    Ok(Embedding::normalized(values))
}

/// Optional vector column selected as `embedding::text`.
pub(crate) fn optional_vector(row: &PgRow, name: &str) -> Result<Option<Embedding>, DomainError> {
    let text: Option<String> = column(row, name)?;
    text.as_deref().map(parse_vector).transpose()
}
