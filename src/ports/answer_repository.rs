//! Persistence port for submitted answer sets.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};

/// One validated answer set, shaped for persistence.
///
/// `presupuesto` is already coerced here: absent or unparseable budgets
/// default to 0 at this layer, per the submission contract.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub user_id: Option<UserId>,
    pub tipo_evento: String,
    pub invitados: i32,
    pub presupuesto: f64,
    pub lugar: String,
    pub horario: String,
    pub comida: String,
    pub musica: String,
    pub decoracion: String,
    pub fecha: Option<NaiveDate>,
}

/// Port for persisting submitted answer sets.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Inserts one submission.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the insert fails
    async fn save(&self, record: &SubmissionRecord) -> Result<(), DomainError>;
}
