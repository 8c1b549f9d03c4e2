//! Chat submission use case.

mod submit_answers;

pub use submit_answers::{SubmitAnswers, SubmitError};
