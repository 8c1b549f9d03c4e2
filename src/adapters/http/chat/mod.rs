//! HTTP adapter for the chat submission endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ErrorResponse};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
