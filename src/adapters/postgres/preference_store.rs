//! PostgreSQL implementation of PreferenceStore.
//!
//! Embeddings live in a pgvector column. Similarity is `1 - cosine distance`
//! and the threshold is inclusive.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, optional_vector, query_error, vector_literal};
use crate::domain::foundation::{ActorId, DomainError, PreferenceId, Timestamp};
use crate::domain::memory::{AgentPreference, Confidence, Embedding, PreferenceSource, Scored};
use crate::ports::PreferenceStore;

const PREFERENCE_COLUMNS: &str = "id, actor_id, scope_id, category, key, value, \
     embedding::text AS embedding, source, confidence, updated_at";

/// PostgreSQL implementation of PreferenceStore.
#[derive(Clone)]
pub struct PostgresPreferenceStore {
    pool: PgPool,
}

impl PostgresPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_preference(row: &PgRow) -> Result<AgentPreference, DomainError> {
    let id: Uuid = column(row, "id")?;
    let actor_id: String = column(row, "actor_id")?;
    let source: String = column(row, "source")?;
    let confidence: f32 = column(row, "confidence")?;

    Ok(AgentPreference {
        id: PreferenceId::from_uuid(id),
        actor_id: ActorId::new(actor_id).map_err(DomainError::from)?,
        scope_id: column(row, "scope_id")?,
        category: column(row, "category")?,
        key: column(row, "key")?,
        value: column(row, "value")?,
        embedding: optional_vector(row, "embedding")?,
        source: PreferenceSource::parse(&source).ok_or_else(|| {
            DomainError::database(format!("Unknown preference source: {}", source))
        })?,
        confidence: Confidence::new(confidence).map_err(DomainError::from)?,
        updated_at: Timestamp::from_datetime(column(row, "updated_at")?),
    })
}

#[async_trait]
impl PreferenceStore for PostgresPreferenceStore {
    async fn upsert(&self, preference: AgentPreference) -> Result<AgentPreference, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO agent_preferences
                (id, actor_id, scope_id, category, key, value, embedding, source, confidence, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7::vector, $8, $9, $10)
            ON CONFLICT (actor_id, (COALESCE(scope_id, '')), category, key)
            DO UPDATE SET
                value = EXCLUDED.value,
                embedding = EXCLUDED.embedding,
                source = EXCLUDED.source,
                confidence = EXCLUDED.confidence,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            PREFERENCE_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(*preference.id.as_uuid())
            .bind(preference.actor_id.as_str())
            .bind(preference.scope_id.as_deref())
            .bind(&preference.category)
            .bind(&preference.key)
            .bind(&preference.value)
            .bind(preference.embedding.as_ref().map(vector_literal))
            .bind(preference.source.as_str())
            .bind(preference.confidence.value())
            .bind(*preference.updated_at.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("upsert preference"))?;

        row_to_preference(&row)
    }

    async fn list(
        &self,
        actor_id: &ActorId,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AgentPreference>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM agent_preferences
            WHERE actor_id = $1
              AND ($2::text IS NULL OR category = $2)
            ORDER BY confidence DESC, updated_at DESC
            LIMIT $3
            "#,
            PREFERENCE_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(actor_id.as_str())
            .bind(category)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("list preferences"))?;

        rows.iter().map(row_to_preference).collect()
    }

    async fn search_similar(
        &self,
        actor_id: &ActorId,
        query: &Embedding,
        category: Option<&str>,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Scored<AgentPreference>>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}, 1 - (embedding <=> $2::vector) AS similarity
            FROM agent_preferences
            WHERE actor_id = $1
              AND embedding IS NOT NULL
              AND ($3::text IS NULL OR category = $3)
              AND 1 - (embedding <=> $2::vector) >= $4
            ORDER BY embedding <=> $2::vector
            LIMIT $5
            "#,
            PREFERENCE_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(actor_id.as_str())
            .bind(vector_literal(query))
            .bind(category)
            .bind(f64::from(threshold))
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("search preferences"))?;

        rows.iter()
            .map(|row| {
                let similarity: f64 = column(row, "similarity")?;
                Ok(Scored::ranked(row_to_preference(row)?, similarity as f32))
            })
            .collect()
    }
}
