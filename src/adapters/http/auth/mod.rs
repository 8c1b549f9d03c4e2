//! HTTP adapter for the authentication endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AuthErrorResponse, GoogleLoginRequest, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, UserResponse,
};
pub use handlers::{hash_password, AuthHandlers};
pub use routes::auth_routes;
