//! Google tokeninfo adapter for ID-token verification.
//!
//! Implements the `GoogleTokenVerifier` port against Google's tokeninfo
//! endpoint: the token goes out as a query parameter, the claims come back
//! as JSON. The audience claim must match our client id before any profile
//! data is trusted.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::ports::{GoogleProfile, GoogleTokenVerifier, TokenError};

/// Verifies Google ID tokens through the tokeninfo endpoint.
pub struct GoogleTokeninfoVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
    client_id: String,
}

impl GoogleTokeninfoVerifier {
    /// Creates a verifier from the auth configuration section.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokeninfo_url: config.tokeninfo_url.clone(),
            client_id: config.google_client_id.clone(),
        }
    }
}

/// Claims subset returned by the tokeninfo endpoint.
#[derive(Debug, Deserialize)]
struct TokeninfoClaims {
    aud: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
}

#[async_trait]
impl GoogleTokenVerifier for GoogleTokeninfoVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, TokenError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| TokenError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TokenError::Rejected(format!(
                "tokeninfo returned status {}",
                response.status()
            )));
        }

        let claims: TokeninfoClaims = response
            .json()
            .await
            .map_err(|e| TokenError::Rejected(format!("unparseable tokeninfo body: {}", e)))?;

        if claims.aud != self.client_id {
            return Err(TokenError::Rejected(format!(
                "audience mismatch: {}",
                claims.aud
            )));
        }

        let nombre = claims.name.unwrap_or_else(|| claims.email.clone());
        Ok(GoogleProfile {
            correo: claims.email,
            nombre,
        })
    }
}
