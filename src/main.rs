//! Backend server entrypoint.
//!
//! Wires configuration, the Postgres pool, the subprocess scorer, and the
//! axum routers, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use evento::adapters::auth::GoogleTokeninfoVerifier;
use evento::adapters::http::auth::{auth_routes, AuthHandlers};
use evento::adapters::http::chat::{chat_routes, ChatHandlers};
use evento::adapters::postgres::{PostgresAnswerRepository, PostgresUserRepository};
use evento::adapters::process::PythonScorer;
use evento::application::handlers::chat::SubmitAnswers;
use evento::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting evento server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running pending migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let answer_repo = Arc::new(PostgresAnswerRepository::new(pool.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(pool));
    let scorer = Arc::new(PythonScorer::new(&config.scorer));
    let verifier = Arc::new(GoogleTokeninfoVerifier::new(&config.auth));

    let submit_handler = Arc::new(SubmitAnswers::new(answer_repo, scorer));

    let cors = build_cors(&config);
    let app = Router::new()
        .merge(chat_routes(ChatHandlers::new(submit_handler)))
        .merge(auth_routes(AuthHandlers::new(user_repo, verifier)))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts origins when configured; development stays permissive.
fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}
