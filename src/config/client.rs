//! Chat client configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::{ConfigError, ValidationError};

/// Configuration for the terminal chat client.
///
/// The submission endpoint is injected from here into the bridge at
/// construction; nothing in the client hardcodes a host.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the evento server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Optional YAML file overriding the built-in question catalog
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load client configuration from `EVENTO_CLIENT`-prefixed variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if present values cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EVENTO_CLIENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.server_url.starts_with("http") {
            return Err(ValidationError::InvalidServerUrl);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            catalog_path: None,
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}
