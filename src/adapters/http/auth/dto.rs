//! HTTP DTOs for the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Local login credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Google sign-in token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// New local account.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Identity object handed back to the client as its session seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    pub proveedor: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i64(),
            nombre: user.nombre,
            correo: user.correo,
            proveedor: user.proveedor.as_str().to_string(),
        }
    }
}

/// Successful login reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub msg: String,
    pub user: UserResponse,
}

/// Login and token failures, keyed `msg` like the login client expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthErrorResponse {
    pub msg: String,
}

impl AuthErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            msg: message.into(),
        }
    }
}

/// Registration reply; the signup form branches on `success` and `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegisterResponse {
    pub fn created(user: UserResponse) -> Self {
        Self {
            success: true,
            user: Some(user),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            error: Some(message.into()),
        }
    }
}
