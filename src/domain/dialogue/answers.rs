//! Accumulated answers for one dialogue session.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use super::format;
use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::UserId;

/// Mapping from question id to the raw answer value, plus the session's
/// user identity. One key is added per accepted answer; the whole set is
/// cleared on restart, never partially rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: HashMap<String, String>,
    user_id: Option<UserId>,
    user_name: Option<String>,
}

impl AnswerSet {
    /// Creates an empty answer set with no identity attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the session's user identity.
    pub fn with_identity(mut self, user_id: Option<UserId>, user_name: Option<String>) -> Self {
        self.user_id = user_id;
        self.user_name = user_name;
        self
    }

    /// Records the answer for a question id, overwriting any prior value.
    pub fn record(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(question_id.into(), value.into());
    }

    /// The raw recorded value for a question id.
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.values.get(question_id).map(|s| s.as_str())
    }

    /// Number of recorded answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no answers have been recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes every recorded answer. Identity is kept; it belongs to the
    /// session, not the questionnaire run.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The user name attached to this session, if known.
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Builds the submission payload: every answer under its question id,
    /// plus `userId` and `nombre`. `presupuesto` is sent as a JSON number
    /// when it parses; otherwise the raw string goes through and the
    /// persistence layer applies its own default.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in &self.values {
            if key == "presupuesto" {
                if let Ok(n) = value.trim().parse::<f64>() {
                    map.insert(key.clone(), json!(n));
                    continue;
                }
            }
            map.insert(key.clone(), Value::String(value.clone()));
        }
        map.insert(
            "userId".to_string(),
            self.user_id.map(|id| json!(id.as_i64())).unwrap_or(Value::Null),
        );
        map.insert(
            "nombre".to_string(),
            self.user_name
                .as_ref()
                .map(|n| Value::String(n.clone()))
                .unwrap_or(Value::Null),
        );
        Value::Object(map)
    }

    /// Builds the human-readable summary block, in catalog order, with
    /// dates, budget, and guest count formatted for display.
    pub fn summary(&self, catalog: &QuestionCatalog) -> String {
        let mut out = String::from("📋 Resumen de tu evento:\n\n");
        for question in catalog.iter() {
            let Some(raw) = self.get(&question.id) else {
                continue;
            };
            let display = match question.id.as_str() {
                "fecha" => format::format_date(raw),
                "presupuesto" => format::format_currency(raw),
                "invitados" => format::format_guests(raw),
                _ => raw.to_string(),
            };
            out.push_str(&format!("• {}: {}\n", question.label(), display));
        }
        out
    }
}
