//! PostgreSQL implementation of DecisionReader.
//!
//! Read-only; rows are written by the learning pipeline.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, optional_vector, query_error, vector_literal};
use crate::domain::foundation::{ActorId, DecisionId, DomainError, Timestamp};
use crate::domain::memory::{AgentDecision, Confidence, Embedding, Scored};
use crate::ports::DecisionReader;

const DECISION_COLUMNS: &str = "id, actor_id, tool_name, input, output, reasoning, confidence, \
     embedding::text AS embedding, was_auto_executed, created_at";

/// PostgreSQL implementation of DecisionReader.
#[derive(Clone)]
pub struct PostgresDecisionReader {
    pool: PgPool,
}

impl PostgresDecisionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_decision(row: &PgRow) -> Result<AgentDecision, DomainError> {
    let id: Uuid = column(row, "id")?;
    let actor_id: String = column(row, "actor_id")?;
    let confidence: Option<f32> = column(row, "confidence")?;

    Ok(AgentDecision {
        id: DecisionId::from_uuid(id),
        actor_id: ActorId::new(actor_id).map_err(DomainError::from)?,
        tool_name: column(row, "tool_name")?,
        input: column(row, "input")?,
        output: column(row, "output")?,
        reasoning: column(row, "reasoning")?,
        confidence: confidence
            .map(Confidence::new)
            .transpose()
            .map_err(DomainError::from)?,
        embedding: optional_vector(row, "embedding")?,
        was_auto_executed: column(row, "was_auto_executed")?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
    })
}

#[async_trait]
impl DecisionReader for PostgresDecisionReader {
    async fn recent(
        &self,
        actor_id: &ActorId,
        tool_name: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AgentDecision>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM agent_decisions
            WHERE actor_id = $1
              AND ($2::text IS NULL OR tool_name = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
            DECISION_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(actor_id.as_str())
            .bind(tool_name)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("load recent decisions"))?;

        rows.iter().map(row_to_decision).collect()
    }

    async fn search_similar(
        &self,
        actor_id: &ActorId,
        query: &Embedding,
        tool_name: Option<&str>,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Scored<AgentDecision>>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}, 1 - (embedding <=> $2::vector) AS similarity
            FROM agent_decisions
            WHERE actor_id = $1
              AND embedding IS NOT NULL
              AND ($3::text IS NULL OR tool_name = $3)
              AND 1 - (embedding <=> $2::vector) >= $4
            ORDER BY embedding <=> $2::vector
            LIMIT $5
            "#,
            DECISION_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(actor_id.as_str())
            .bind(vector_literal(query))
            .bind(tool_name)
            .bind(f64::from(threshold))
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("search decisions"))?;

        rows.iter()
            .map(|row| {
                let similarity: f64 = column(row, "similarity")?;
                Ok(Scored::ranked(row_to_decision(row)?, similarity as f32))
            })
            .collect()
    }
}
