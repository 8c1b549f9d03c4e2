//! Adapters - Implementations of ports against concrete infrastructure.
//!
//! - `postgres` - sqlx repositories for users and submitted answers
//! - `process` - subprocess scorer invocation
//! - `http` - axum routers for the chat and auth endpoints
//! - `auth` - identity provider integration
//! - `gateway` - outbound client bridge to the submission endpoint

pub mod auth;
pub mod gateway;
pub mod http;
pub mod postgres;
pub mod process;
