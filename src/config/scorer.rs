//! Scorer process configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the out-of-process scorer invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct ScorerConfig {
    /// Interpreter to run (e.g. `python` or `python3`)
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Path of the prediction script, passed as the first argument
    #[serde(default = "default_script")]
    pub script: String,

    /// Hard deadline for one scorer run, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum scorer processes allowed to run at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl ScorerConfig {
    /// Deadline as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate scorer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interpreter.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SCORER_INTERPRETER"));
        }
        if self.script.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SCORER_SCRIPT"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_concurrent == 0 {
            return Err(ValidationError::InvalidConcurrencyBound);
        }
        Ok(())
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            timeout_secs: default_timeout(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_script() -> String {
    "./ML/predict.py".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_concurrent() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scorer_defaults_are_valid() {
        let config = ScorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_concurrent, 4);
    }

    #[test]
    fn test_validation_rejects_blank_script() {
        let config = ScorerConfig {
            script: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = ScorerConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_concurrency() {
        let config = ScorerConfig {
            max_concurrent: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
