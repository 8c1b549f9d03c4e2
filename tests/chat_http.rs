//! Integration tests for the chat submission endpoint.
//!
//! These drive the axum router with in-memory fakes for persistence and
//! scoring, checking the full request-to-reply contract including the
//! degraded replies and the error statuses.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use evento::adapters::http::chat::{chat_routes, ChatHandlers};
use evento::application::handlers::chat::SubmitAnswers;
use evento::domain::foundation::{DomainError, ErrorCode};
use evento::domain::scoring::ScoringResult;
use evento::ports::{AnswerRepository, Scorer, ScorerError, SubmissionRecord};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Captures saved records so assertions can inspect the coerced values.
struct MockAnswerRepository {
    saved: Mutex<Vec<SubmissionRecord>>,
    fail: AtomicBool,
}

impl MockAnswerRepository {
    fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    fn failing() -> Self {
        let repo = Self::new();
        repo.fail.store(true, Ordering::SeqCst);
        repo
    }
}

#[async_trait]
impl AnswerRepository for MockAnswerRepository {
    async fn save(&self, record: &SubmissionRecord) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::new(ErrorCode::DatabaseError, "insert failed"));
        }
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Scorer fake that records the payload it was handed.
struct MockScorer {
    outcome: Mutex<Option<Result<ScoringResult, ScorerError>>>,
    payloads: Mutex<Vec<Value>>,
}

impl MockScorer {
    fn with(outcome: Result<ScoringResult, ScorerError>) -> Self {
        Self {
            outcome: Mutex::new(Some(outcome)),
            payloads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Scorer for MockScorer {
    async fn score(&self, payload: &Value) -> Result<ScoringResult, ScorerError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("scorer invoked more than once")
    }
}

fn usable_result() -> ScoringResult {
    ScoringResult {
        prediccion: Some(6200.0),
        msg: Some("Presupuesto estimado: $6,200".into()),
        recomendacion: Some("Considera reducir invitados".into()),
        presupuesto_suficiente: Some(false),
        diferencia: Some(1200.0),
    }
}

fn app(
    repo: Arc<MockAnswerRepository>,
    scorer: Arc<MockScorer>,
) -> axum::Router {
    chat_routes(ChatHandlers::new(Arc::new(SubmitAnswers::new(repo, scorer))))
}

fn full_body() -> Value {
    json!({
        "userId": 7,
        "nombre": "Ana",
        "tipo_evento": "Boda",
        "presupuesto": "5000",
        "invitados": 50,
        "lugar": "Interior",
        "horario": "Noche",
        "comida": "Buffet",
        "musica": "DJ",
        "decoracion": "Sin decoración",
        "fecha": "2025-12-20"
    })
}

async fn post_chat(app: axum::Router, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn happy_path_persists_and_returns_recommendation() {
    let repo = Arc::new(MockAnswerRepository::new());
    let scorer = Arc::new(MockScorer::with(Ok(usable_result())));

    let (status, body) = post_chat(app(repo.clone(), scorer.clone()), &full_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["msg"], "Presupuesto estimado: $6,200");
    assert_eq!(body["recomendacion"], "Considera reducir invitados");
    assert_eq!(body["prediccion"], 6200.0);

    let saved = repo.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].tipo_evento, "Boda");
    assert_eq!(saved[0].presupuesto, 5000.0);
    assert_eq!(saved[0].invitados, 50);
    assert_eq!(
        saved[0].fecha,
        chrono::NaiveDate::from_ymd_opt(2025, 12, 20)
    );

    // the scorer gets the raw body, identity included
    let payloads = scorer.payloads.lock().unwrap();
    assert_eq!(payloads[0]["userId"], 7);
    assert_eq!(payloads[0]["presupuesto"], "5000");
}

#[tokio::test]
async fn budget_string_defaults_to_zero_when_unparseable() {
    let repo = Arc::new(MockAnswerRepository::new());
    let scorer = Arc::new(MockScorer::with(Ok(usable_result())));

    let mut body = full_body();
    body["presupuesto"] = json!("bastante");
    let (status, _) = post_chat(app(repo.clone(), scorer), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(repo.saved.lock().unwrap()[0].presupuesto, 0.0);
}

#[tokio::test]
async fn persistence_failure_is_500_and_skips_scoring() {
    let repo = Arc::new(MockAnswerRepository::failing());
    let scorer = Arc::new(MockScorer::with(Ok(usable_result())));

    let (status, body) = post_chat(app(repo, scorer.clone()), &full_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["msg"], "Error guardando respuestas");
    assert!(scorer.payloads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn scorer_nonzero_exit_is_500() {
    let repo = Arc::new(MockAnswerRepository::new());
    let scorer = Arc::new(MockScorer::with(Err(ScorerError::NonZeroExit {
        code: Some(1),
        stderr: "traceback".into(),
    })));

    let (status, body) = post_chat(app(repo, scorer), &full_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["msg"], "Error procesando la predicción");
}

#[tokio::test]
async fn scorer_garbage_output_degrades_to_success_false() {
    let repo = Arc::new(MockAnswerRepository::new());
    let scorer = Arc::new(MockScorer::with(Err(ScorerError::InvalidOutput(
        "expected value at line 1".into(),
    ))));

    let (status, body) = post_chat(app(repo.clone(), scorer), &full_body()).await;

    // answers are already saved, so the reply degrades instead of failing
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["msg"], "Respuestas guardadas con éxito");
    assert!(body["recomendacion"]
        .as_str()
        .unwrap()
        .starts_with("Error al procesar la recomendación"));
    assert_eq!(repo.saved.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn scorer_incomplete_result_uses_fallback_reply() {
    let repo = Arc::new(MockAnswerRepository::new());
    let scorer = Arc::new(MockScorer::with(Ok(ScoringResult {
        prediccion: Some(6200.0),
        msg: None,
        recomendacion: None,
        presupuesto_suficiente: None,
        diferencia: None,
    })));

    let (status, body) = post_chat(app(repo, scorer), &full_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["msg"], "Análisis completado");
    assert_eq!(body["recomendacion"], "No se pudo generar recomendación");
}

#[tokio::test]
async fn anonymous_submission_is_accepted() {
    let repo = Arc::new(MockAnswerRepository::new());
    let scorer = Arc::new(MockScorer::with(Ok(usable_result())));

    let mut body = full_body();
    body.as_object_mut().unwrap().remove("userId");
    body.as_object_mut().unwrap().remove("nombre");
    let (status, _) = post_chat(app(repo.clone(), scorer), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(repo.saved.lock().unwrap()[0].user_id.is_none());
}
