//! HTTP handlers for the authentication endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::foundation::ErrorCode;
use crate::domain::user::Provider;
use crate::ports::{GoogleTokenVerifier, TokenError, UserRepository};

use super::dto::{
    AuthErrorResponse, GoogleLoginRequest, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, UserResponse,
};

#[derive(Clone)]
pub struct AuthHandlers {
    user_repo: Arc<dyn UserRepository>,
    verifier: Arc<dyn GoogleTokenVerifier>,
}

impl AuthHandlers {
    pub fn new(user_repo: Arc<dyn UserRepository>, verifier: Arc<dyn GoogleTokenVerifier>) -> Self {
        Self {
            user_repo,
            verifier,
        }
    }
}

/// Hex-encoded SHA-256 of a password, the storage format for local accounts.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{:x}", digest)
}

fn hashes_match(provided: &str, stored: &str) -> bool {
    provided.as_bytes().ct_eq(stored.as_bytes()).into()
}

/// POST /login - Local credential check
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let (Some(correo), Some(password)) = (
        req.correo.filter(|c| !c.trim().is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthErrorResponse::new("Correo y contraseña requeridos")),
        )
            .into_response();
    };

    let stored = match handlers.user_repo.password_hash(&correo).await {
        Ok(hash) => hash,
        Err(e) => return internal_error(e),
    };
    let Some(stored) = stored else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(AuthErrorResponse::new("Usuario no encontrado")),
        )
            .into_response();
    };

    if !hashes_match(&hash_password(&password), &stored) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(AuthErrorResponse::new("Contraseña incorrecta")),
        )
            .into_response();
    }

    match handlers
        .user_repo
        .find_by_correo(&correo, Some(Provider::Local))
        .await
    {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(LoginResponse {
                msg: "Login correcto".to_string(),
                user: user.into(),
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(AuthErrorResponse::new("Usuario no encontrado")),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST /auth/google - Federated sign-in, creating the account on first use
pub async fn google_login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<GoogleLoginRequest>,
) -> Response {
    let Some(token) = req.token.filter(|t| !t.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthErrorResponse::new("Token no proporcionado")),
        )
            .into_response();
    };

    let profile = match handlers.verifier.verify(&token).await {
        Ok(profile) => profile,
        Err(TokenError::Rejected(reason)) => {
            tracing::warn!(%reason, "google token rejected");
            return (
                StatusCode::UNAUTHORIZED,
                Json(AuthErrorResponse::new("Token inválido o expirado")),
            )
                .into_response();
        }
        Err(TokenError::Unavailable(reason)) => {
            tracing::error!(%reason, "token verification unavailable");
            return (
                StatusCode::UNAUTHORIZED,
                Json(AuthErrorResponse::new("Token inválido o expirado")),
            )
                .into_response();
        }
    };

    match handlers.user_repo.find_by_correo(&profile.correo, None).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(LoginResponse {
                msg: "Login con Google correcto".to_string(),
                user: user.into(),
            }),
        )
            .into_response(),
        Ok(None) => {
            match handlers
                .user_repo
                .create(&profile.nombre, &profile.correo, Provider::Google, None)
                .await
            {
                Ok(user) => (
                    StatusCode::OK,
                    Json(LoginResponse {
                        msg: "Usuario creado con Google".to_string(),
                        user: user.into(),
                    }),
                )
                    .into_response(),
                Err(e) => internal_error(e),
            }
        }
        Err(e) => internal_error(e),
    }
}

/// POST /api/usuarios - Local account registration
pub async fn register(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let (Some(nombre), Some(correo), Some(password)) = (
        req.nombre.filter(|n| !n.trim().is_empty()),
        req.correo.filter(|c| !c.trim().is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse::failed("Todos los campos son requeridos")),
        )
            .into_response();
    };

    let hash = hash_password(&password);
    match handlers
        .user_repo
        .create(nombre.trim(), correo.trim(), Provider::Local, Some(&hash))
        .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(RegisterResponse::created(UserResponse::from(user))),
        )
            .into_response(),
        Err(e) if e.code == ErrorCode::DuplicateUser => (
            StatusCode::CONFLICT,
            Json(RegisterResponse::failed("El correo ya está registrado")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "registration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RegisterResponse::failed("Error al registrar usuario")),
            )
                .into_response()
        }
    }
}

fn internal_error(error: crate::domain::foundation::DomainError) -> Response {
    tracing::error!(error = %error, "auth request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AuthErrorResponse::new("Error interno del servidor")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_hex_sha256() {
        // echo -n "secret123" | sha256sum
        assert_eq!(
            hash_password("secret123"),
            "fcf730b6d95236ecd3c9fc2d92d7b6b2bb061514961aec041d6c7a7192f592e4"
        );
    }

    #[test]
    fn hash_comparison_rejects_mismatch() {
        let stored = hash_password("secret123");
        assert!(hashes_match(&hash_password("secret123"), &stored));
        assert!(!hashes_match(&hash_password("secret124"), &stored));
    }
}
