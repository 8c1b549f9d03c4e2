//! Client-side port for the backend submission endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The backend's reply to a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub msg: Option<String>,

    #[serde(default)]
    pub recomendacion: Option<String>,

    #[serde(default)]
    pub prediccion: Option<f64>,

    #[serde(default)]
    pub presupuesto_suficiente: Option<bool>,

    #[serde(default)]
    pub diferencia: Option<f64>,

    #[serde(default)]
    pub success: bool,
}

impl ChatReply {
    /// True when both display fields are present and non-empty.
    pub fn has_recommendation(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.msg) && filled(&self.recomendacion)
    }
}

/// Failures of one submission round trip.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// A 2xx response whose body could not be parsed.
    #[error("unparseable backend response: {0}")]
    Malformed(String),
}

/// Port for submitting one full answer set and awaiting the recommendation.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Issues exactly one outbound request carrying the payload.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`]; none of these are retried automatically.
    async fn submit(&self, payload: &Value) -> Result<ChatReply, GatewayError>;
}
