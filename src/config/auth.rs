//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (Google federated sign-in).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OAuth client id that verified ID tokens must be issued for
    #[serde(default)]
    pub google_client_id: String,

    /// Token verification endpoint; override only in tests
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.google_client_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GOOGLE_CLIENT_ID"));
        }
        if !self.tokeninfo_url.starts_with("http") {
            return Err(ValidationError::InvalidTokeninfoUrl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: String::new(),
            tokeninfo_url: default_tokeninfo_url(),
        }
    }
}

fn default_tokeninfo_url() -> String {
    "https://oauth2.googleapis.com/tokeninfo".to_string()
}
