//! Foundation value objects and shared domain primitives.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SubmissionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
