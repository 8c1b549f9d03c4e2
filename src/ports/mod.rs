//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AnswerRepository` - persistence of submitted answer sets
//! - `Scorer` - one-shot out-of-process scoring run
//! - `SubmissionGateway` - client-side bridge to the submission endpoint
//! - `GoogleTokenVerifier` / `UserRepository` - authentication boundary

mod answer_repository;
mod auth;
mod scorer;
mod submission_gateway;

pub use answer_repository::{AnswerRepository, SubmissionRecord};
pub use auth::{GoogleProfile, GoogleTokenVerifier, TokenError, UserRepository};
pub use scorer::{Scorer, ScorerError};
pub use submission_gateway::{ChatReply, GatewayError, SubmissionGateway};
