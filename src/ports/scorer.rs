//! Port for the external scoring process.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::scoring::ScoringResult;

/// Failures of one scorer invocation, kept distinct so callers can log and
/// map them differently.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// The scorer executable could not be started at all.
    #[error("failed to spawn scorer process: {0}")]
    Spawn(#[source] std::io::Error),

    /// The process ran but exited nonzero; stderr is the failure detail.
    #[error("scorer exited with code {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    /// The process exceeded the configured deadline and was killed.
    #[error("scorer timed out after {0} seconds")]
    Timeout(u64),

    /// Exit code 0 but stdout was not a parseable result.
    #[error("scorer produced unparseable output: {0}")]
    InvalidOutput(String),

    /// Reading the process streams failed mid-flight.
    #[error("scorer I/O error: {0}")]
    Io(#[source] std::io::Error),
}

/// Port for the opaque one-shot scorer.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Scores one serialized answer set.
    ///
    /// # Errors
    ///
    /// See [`ScorerError`] for the full failure taxonomy.
    async fn score(&self, payload: &Value) -> Result<ScoringResult, ScorerError>;
}
