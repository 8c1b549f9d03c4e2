//! Scorer adapter that shells out to the prediction script.
//!
//! One invocation per submission: the serialized payload goes in as a single
//! argv entry, the result comes back as one JSON object on stdout. A
//! semaphore bounds concurrent interpreter processes and a deadline kills
//! runs that hang.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::config::ScorerConfig;
use crate::domain::scoring::ScoringResult;
use crate::ports::{Scorer, ScorerError};

/// Runs the external Python scorer as a one-shot subprocess.
pub struct PythonScorer {
    interpreter: String,
    script: String,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl PythonScorer {
    /// Creates a scorer from its configuration section.
    pub fn new(config: &ScorerConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            script: config.script.clone(),
            timeout: config.timeout(),
            permits: Arc::new(Semaphore::new(config.max_concurrent)),
        }
    }
}

#[async_trait]
impl Scorer for PythonScorer {
    async fn score(&self, payload: &Value) -> Result<ScoringResult, ScorerError> {
        // closed only on drop, and we never close it
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ScorerError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

        let mut child = Command::new(&self.interpreter)
            .arg(&self.script)
            .arg(payload.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ScorerError::Spawn)?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(ScorerError::Io)?,
            Err(_) => {
                // kill_on_drop reaps the process once `child` leaves scope
                return Err(ScorerError::Timeout(self.timeout.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(code = ?output.status.code(), %stderr, "scorer exited nonzero");
            return Err(ScorerError::NonZeroExit {
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let trimmed = stdout.trim();
        serde_json::from_str::<ScoringResult>(trimmed).map_err(|e| {
            ScorerError::InvalidOutput(format!("{} (stdout: {:?})", e, truncate(trimmed, 200)))
        })
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
