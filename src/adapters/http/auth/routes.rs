//! HTTP routes for the authentication endpoints.

use axum::{routing::post, Router};

use super::handlers::{google_login, login, register, AuthHandlers};

/// Creates the auth router.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/auth/google", post(google_login))
        .route("/api/usuarios", post(register))
        .with_state(handlers)
}
