//! Question definitions for the intake dialogue.
//!
//! Each question is immutable and carries either a fixed choice set or a
//! free input kind; the tagged `QuestionInput` variant makes the
//! "choices or input kind, never both" rule impossible to violate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// How the user supplies an answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionInput {
    /// Pick one of a fixed, ordered set of options.
    Choice(Vec<String>),
    /// Free text.
    Text,
    /// Numeric value, constrained by the input widget.
    Number,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
}

impl QuestionInput {
    /// Returns the choice set, if this is a choice question.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            QuestionInput::Choice(options) => Some(options),
            _ => None,
        }
    }

    /// Returns true for date questions, whose answers get display formatting.
    pub fn is_date(&self) -> bool {
        matches!(self, QuestionInput::Date)
    }
}

/// A single question in the intake sequence.
///
/// # Invariants
///
/// - `id` is unique within a catalog (enforced by [`super::QuestionCatalog`])
/// - `id` and `prompt` are non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable key the answer is recorded under (e.g. `tipo_evento`).
    pub id: String,

    /// Prompt text shown to the user.
    pub prompt: String,

    /// How the answer is supplied.
    pub input: QuestionInput,
}

impl Question {
    /// Creates a question, validating id and prompt.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `id` or `prompt` is blank
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        input: QuestionInput,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let prompt = prompt.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        if prompt.trim().is_empty() {
            return Err(ValidationError::empty_field("prompt"));
        }
        Ok(Self { id, prompt, input })
    }

    /// Convenience constructor for a choice question.
    pub fn choice(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: &[&str],
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            prompt,
            QuestionInput::Choice(options.iter().map(|s| s.to_string()).collect()),
        )
    }

    /// The prompt stripped of question marks, used as a summary label.
    pub fn label(&self) -> String {
        self.prompt.replace(['¿', '?'], "")
    }
}
