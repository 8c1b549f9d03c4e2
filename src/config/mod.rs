//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `EVENTO` prefix
//! and nested sections use `__` (double underscore) as separator:
//!
//! - `EVENTO__SERVER__PORT=5000` -> `server.port = 5000`
//! - `EVENTO__DATABASE__URL=...` -> `database.url = ...`
//! - `EVENTO__SCORER__SCRIPT=./ML/predict.py` -> `scorer.script = ...`

mod auth;
mod client;
mod database;
mod error;
mod scorer;
mod server;

pub use auth::AuthConfig;
pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use scorer::ScorerConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration for the server binary.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (Google sign-in)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Scorer process configuration
    #[serde(default)]
    pub scorer: ScorerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first if present (development), then reads
    /// `EVENTO`-prefixed variables into the typed sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EVENTO")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any section holds an invalid value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.scorer.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("EVENTO__DATABASE__URL", "postgresql://test@localhost/eventos");
        env::set_var("EVENTO__AUTH__GOOGLE_CLIENT_ID", "client-id");
    }

    fn clear_env() {
        env::remove_var("EVENTO__DATABASE__URL");
        env::remove_var("EVENTO__AUTH__GOOGLE_CLIENT_ID");
        env::remove_var("EVENTO__SERVER__PORT");
        env::remove_var("EVENTO__SCORER__TIMEOUT_SECS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/eventos");
        assert_eq!(config.auth.google_client_id, "client-id");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.scorer.interpreter, "python");
        assert_eq!(config.scorer.max_concurrent, 4);
    }

    #[test]
    fn test_custom_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("EVENTO__SERVER__PORT", "3000");
        env::set_var("EVENTO__SCORER__TIMEOUT_SECS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.scorer.timeout_secs, 5);
    }
}
