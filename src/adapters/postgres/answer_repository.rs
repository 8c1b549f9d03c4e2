//! PostgreSQL implementation of AnswerRepository.
//!
//! Persists one row per submitted answer set.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AnswerRepository, SubmissionRecord};

/// PostgreSQL implementation of AnswerRepository.
#[derive(Clone)]
pub struct PostgresAnswerRepository {
    pool: PgPool,
}

impl PostgresAnswerRepository {
    /// Creates a new PostgresAnswerRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
    async fn save(&self, record: &SubmissionRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO respuestas (
                user_id, tipo_evento, invitados, presupuesto, lugar,
                horario, comida, musica, decoracion, fecha
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.user_id.map(|id| id.as_i64()))
        .bind(&record.tipo_evento)
        .bind(record.invitados)
        .bind(record.presupuesto)
        .bind(&record.lugar)
        .bind(&record.horario)
        .bind(&record.comida)
        .bind(&record.musica)
        .bind(&record.decoracion)
        .bind(record.fecha)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert answers: {}", e),
            )
        })?;

        Ok(())
    }
}
