//! The ordered question catalog.
//!
//! Fixed at session start; order defines dialogue progression. The default
//! catalog carries the nine event-planning questions, and deployments can
//! override the wording from a YAML file.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::question::{Question, QuestionInput};
use crate::domain::foundation::ValidationError;

static DEFAULT_CATALOG: Lazy<QuestionCatalog> = Lazy::new(|| {
    QuestionCatalog::new(vec![
        Question::choice(
            "tipo_evento",
            "¿Qué tipo de evento deseas?",
            &["Boda", "Cumpleaños", "Quinceaños"],
        )
        .expect("default catalog"),
        Question::new(
            "presupuesto",
            "Ingresa tu presupuesto aproximado en números",
            QuestionInput::Number,
        )
        .expect("default catalog"),
        Question::new(
            "invitados",
            "¿Cuántas personas asistirán al evento?",
            QuestionInput::Number,
        )
        .expect("default catalog"),
        Question::choice(
            "lugar",
            "¿El evento será en interior o exterior?",
            &["Interior", "Exterior"],
        )
        .expect("default catalog"),
        Question::choice(
            "horario",
            "¿El evento será de día o de noche?",
            &["Día", "Noche"],
        )
        .expect("default catalog"),
        Question::choice(
            "comida",
            "¿Qué tipo de servicio de comida prefieres?",
            &["Buffet", "A la carta", "No se necesita comida"],
        )
        .expect("default catalog"),
        Question::choice(
            "musica",
            "¿Qué tipo de música prefieres?",
            &["Música en vivo", "DJ", "Playlist pregrabada", "Sin música"],
        )
        .expect("default catalog"),
        Question::choice(
            "decoracion",
            "¿Qué tipo de decoración prefieres?",
            &[
                "Arreglos florales",
                "Centros de mesa elegantes",
                "Guirnaldas o globos",
                "Sin decoración",
            ],
        )
        .expect("default catalog"),
        Question::new("fecha", "¿Cuál es la fecha del evento?", QuestionInput::Date)
            .expect("default catalog"),
    ])
    .expect("default catalog is valid")
});

/// Ordered, immutable sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Builds a catalog, enforcing unique ids.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the question list is empty
    /// - `Duplicate` if two questions share an id
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(ValidationError::duplicate("id", q.id.clone()));
            }
        }
        Ok(Self { questions })
    }

    /// The built-in event-planning catalog.
    pub fn default_catalog() -> &'static QuestionCatalog {
        &DEFAULT_CATALOG
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the file cannot be read or parsed
    /// - `Duplicate` / `EmptyField` per [`QuestionCatalog::new`]
    pub fn from_yaml_file(path: &Path) -> Result<Self, ValidationError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::invalid_format("catalog", format!("cannot read {}: {}", path.display(), e))
        })?;
        let questions: Vec<Question> = serde_yaml::from_str(&raw).map_err(|e| {
            ValidationError::invalid_format("catalog", format!("invalid YAML: {}", e))
        })?;
        Self::new(questions)
    }

    /// Returns the question at `index`, if in range.
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions.
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Position of a question id within the sequence.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// Iterates questions in dialogue order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl TryFrom<Vec<Question>> for QuestionCatalog {
    type Error = ValidationError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<QuestionCatalog> for Vec<Question> {
    fn from(catalog: QuestionCatalog) -> Self {
        catalog.questions
    }
}
