//! Evento - Conversational event planning assistant
//!
//! A chat wizard walks the user through a fixed questionnaire about the
//! event they are planning, submits the collected answers to the backend,
//! and relays back a budget recommendation produced by an external scoring
//! script.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
