//! Wire type for the external scorer's output.

use serde::{Deserialize, Serialize};

/// Structured output of one scorer run.
///
/// The scorer is opaque: only the presence of `msg` and `recomendacion` is
/// validated before the rest of the payload is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Estimated event cost.
    #[serde(default)]
    pub prediccion: Option<f64>,

    /// Human-readable analysis message.
    #[serde(default)]
    pub msg: Option<String>,

    /// The recommendation itself.
    #[serde(default)]
    pub recomendacion: Option<String>,

    /// Whether the stated budget covers the estimate.
    #[serde(default)]
    pub presupuesto_suficiente: Option<bool>,

    /// Absolute difference between estimate and budget.
    #[serde(default)]
    pub diferencia: Option<f64>,
}

impl ScoringResult {
    /// True when both required fields are present and non-empty.
    pub fn is_usable(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.msg) && filled(&self.recomendacion)
    }
}
