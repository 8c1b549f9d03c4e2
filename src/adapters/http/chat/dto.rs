//! HTTP DTOs for the chat submission endpoint.
//!
//! The request mirrors what the conversational client sends: one flat JSON
//! object keyed by question id plus the optional identity. Clients are
//! loose about numeric types, so `presupuesto` and `invitados` accept both
//! JSON numbers and numeric strings.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::UserId;
use crate::ports::SubmissionRecord;

/// One full answer set as posted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub nombre: Option<String>,

    #[serde(default)]
    pub tipo_evento: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub presupuesto: Option<f64>,

    #[serde(default, deserialize_with = "lenient_i32")]
    pub invitados: Option<i32>,

    #[serde(default)]
    pub lugar: Option<String>,

    #[serde(default)]
    pub horario: Option<String>,

    #[serde(default)]
    pub comida: Option<String>,

    #[serde(default)]
    pub musica: Option<String>,

    #[serde(default)]
    pub decoracion: Option<String>,

    #[serde(default)]
    pub fecha: Option<String>,
}

impl ChatRequest {
    /// Shapes the request for persistence.
    ///
    /// Absent or unparseable numbers become 0, absent strings become empty,
    /// and a date that does not parse as `YYYY-MM-DD` is dropped.
    pub fn into_record(self) -> SubmissionRecord {
        SubmissionRecord {
            user_id: self.user_id.map(UserId::new),
            tipo_evento: self.tipo_evento.unwrap_or_default(),
            invitados: self.invitados.unwrap_or(0),
            presupuesto: self.presupuesto.unwrap_or(0.0),
            lugar: self.lugar.unwrap_or_default(),
            horario: self.horario.unwrap_or_default(),
            comida: self.comida.unwrap_or_default(),
            musica: self.musica.unwrap_or_default(),
            decoracion: self.decoracion.unwrap_or_default(),
            fecha: self
                .fecha
                .as_deref()
                .and_then(|f| NaiveDate::parse_from_str(f.trim(), "%Y-%m-%d").ok()),
        }
    }
}

/// Error body for failed submissions, keyed `msg` like the success replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            msg: message.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        NumberOrString::Number(n) => Some(n),
        NumberOrString::Text(s) => s.trim().parse().ok(),
    }))
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        NumberOrString::Number(n) => Some(n as i32),
        NumberOrString::Text(s) => s.trim().parse().ok(),
    }))
}
