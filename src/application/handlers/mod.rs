//! Application use-case handlers.

pub mod chat;
