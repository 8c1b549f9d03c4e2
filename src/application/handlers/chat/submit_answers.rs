//! Submission orchestration: persist the answer set, run the scorer,
//! shape the reply.
//!
//! Hard failures (persistence, spawn, nonzero exit, timeout) become errors
//! for the HTTP layer to map to 500, while an exit-0 run with unusable
//! output degrades to a `success: false` reply instead of failing the
//! request.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{DomainError, SubmissionId};
use crate::ports::{AnswerRepository, ChatReply, Scorer, ScorerError, SubmissionRecord};

/// Hard failures of one submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to persist answers: {0}")]
    Persistence(#[source] DomainError),

    #[error("scorer run failed: {0}")]
    Scoring(#[source] ScorerError),
}

/// Application handler for the submission endpoint.
pub struct SubmitAnswers {
    repository: Arc<dyn AnswerRepository>,
    scorer: Arc<dyn Scorer>,
}

impl SubmitAnswers {
    /// Creates the handler with its collaborators.
    pub fn new(repository: Arc<dyn AnswerRepository>, scorer: Arc<dyn Scorer>) -> Self {
        Self { repository, scorer }
    }

    /// Persists the record, invokes the scorer with the full payload, and
    /// builds the reply.
    ///
    /// # Errors
    ///
    /// - `Persistence` if the insert fails
    /// - `Scoring` for spawn failures, nonzero exits, timeouts, and stream
    ///   errors; unparseable exit-0 output is *not* an error
    pub async fn handle(
        &self,
        record: SubmissionRecord,
        payload: &Value,
    ) -> Result<ChatReply, SubmitError> {
        let submission_id = SubmissionId::new();
        self.repository
            .save(&record)
            .await
            .map_err(SubmitError::Persistence)?;
        tracing::info!(%submission_id, user_id = ?record.user_id, "answers persisted");

        match self.scorer.score(payload).await {
            Ok(result) if result.is_usable() => Ok(ChatReply {
                msg: result.msg,
                recomendacion: result.recomendacion,
                prediccion: result.prediccion,
                presupuesto_suficiente: result.presupuesto_suficiente,
                diferencia: result.diferencia,
                success: true,
            }),
            Ok(_) => {
                tracing::warn!(%submission_id, "scorer output missing msg/recomendacion, degrading");
                Ok(ChatReply {
                    msg: Some("Análisis completado".to_string()),
                    recomendacion: Some("No se pudo generar recomendación".to_string()),
                    prediccion: None,
                    presupuesto_suficiente: None,
                    diferencia: None,
                    success: false,
                })
            }
            Err(ScorerError::InvalidOutput(detail)) => {
                tracing::warn!(%submission_id, %detail, "scorer stdout unparseable, degrading");
                Ok(ChatReply {
                    msg: Some("Respuestas guardadas con éxito".to_string()),
                    recomendacion: Some(format!(
                        "Error al procesar la recomendación: {}",
                        detail
                    )),
                    prediccion: None,
                    presupuesto_suficiente: None,
                    diferencia: None,
                    success: false,
                })
            }
            Err(err) => Err(SubmitError::Scoring(err)),
        }
    }
}
