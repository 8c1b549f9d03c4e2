//! HTTP handlers for the chat submission endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::application::handlers::chat::{SubmitAnswers, SubmitError};
use crate::ports::ScorerError;

use super::dto::{ChatRequest, ErrorResponse};

#[derive(Clone)]
pub struct ChatHandlers {
    submit_handler: Arc<SubmitAnswers>,
}

impl ChatHandlers {
    pub fn new(submit_handler: Arc<SubmitAnswers>) -> Self {
        Self { submit_handler }
    }
}

/// POST /chat - Persist one answer set and return the recommendation
///
/// The raw body is forwarded to the scorer untouched; only the persistence
/// view is reshaped.
pub async fn submit_chat(State(handlers): State<ChatHandlers>, Json(body): Json<Value>) -> Response {
    let request: ChatRequest = match serde_json::from_value(body.clone()) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting malformed chat request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No se recibieron respuestas")),
            )
                .into_response();
        }
    };

    match handlers.submit_handler.handle(request.into_record(), &body).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => handle_submit_error(e),
    }
}

fn handle_submit_error(error: SubmitError) -> Response {
    let message = match &error {
        SubmitError::Persistence(_) => "Error guardando respuestas",
        SubmitError::Scoring(ScorerError::Spawn(_)) => "Error ejecutando el análisis",
        SubmitError::Scoring(_) => "Error procesando la predicción",
    };
    tracing::error!(error = %error, "chat submission failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}
