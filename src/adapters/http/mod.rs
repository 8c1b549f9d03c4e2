//! HTTP adapters: axum routers and their DTOs.

pub mod auth;
pub mod chat;
