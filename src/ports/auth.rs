//! Ports for the authentication boundary.
//!
//! The chat core treats identity as an opaque session seed; these contracts
//! keep credential storage and federated verification outside the domain.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::domain::user::{Provider, User};

/// Profile extracted from a verified Google ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleProfile {
    pub correo: String,
    pub nombre: String,
}

/// Failures verifying a federated token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is invalid, expired, or issued for another audience.
    #[error("token rejected: {0}")]
    Rejected(String),

    /// The verification call itself could not complete.
    #[error("verification unavailable: {0}")]
    Unavailable(String),
}

/// Port for verifying Google ID tokens.
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    /// Verifies a token and extracts the profile.
    ///
    /// # Errors
    ///
    /// - `Rejected` for bad tokens, `Unavailable` for transport problems
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, TokenError>;
}

/// Port for the user credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email, optionally restricted to one provider.
    async fn find_by_correo(
        &self,
        correo: &str,
        proveedor: Option<Provider>,
    ) -> Result<Option<User>, DomainError>;

    /// Returns the stored password hash for a local account, if any.
    async fn password_hash(&self, correo: &str) -> Result<Option<String>, DomainError>;

    /// Creates a user record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `DuplicateUser` if the email is already registered
    async fn create(
        &self,
        nombre: &str,
        correo: &str,
        proveedor: Provider,
        password_hash: Option<&str>,
    ) -> Result<User, DomainError>;
}
