//! Security ports for password hashing and access token handling.

use crate::domain::UserId;
use chrono::Duration;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by password hashing implementations.
#[derive(Debug, Clone, Error)]
pub enum PasswordHashError {
    /// The hashing backend failed.
    #[error("password hashing failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl PasswordHashError {
    /// Wraps a backend error.
    #[must_use]
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Password hashing contract.
///
/// Hashing is synchronous: implementations are CPU-bound and callers invoke
/// them directly from service code.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Backend`] when the backend fails.
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// Returns `false` on mismatch; an error means the check itself could
    /// not run.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Backend`] when the stored hash is
    /// unreadable or the backend fails.
    fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

/// Errors returned by token issuer implementations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// The token was rejected: bad signature, malformed, or expired.
    #[error("invalid access token")]
    Invalid,

    /// The token verified but its claims did not parse.
    #[error("malformed token claims")]
    MalformedClaims,

    /// The signing backend failed.
    #[error("token signing failed: {0}")]
    Signing(Arc<dyn std::error::Error + Send + Sync>),
}

impl TokenError {
    /// Wraps a signing backend error.
    #[must_use]
    pub fn signing(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Signing(Arc::new(err))
    }
}

/// Claims carried by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Username recorded at issue time.
    pub username: String,
}

/// Access token issuing and verification contract.
pub trait TokenIssuer: Send + Sync {
    /// Issues a signed access token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when the backend cannot sign.
    fn issue(&self, user_id: UserId, username: &str) -> Result<String, TokenError>;

    /// Verifies a token and extracts its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] when the token is rejected or
    /// [`TokenError::MalformedClaims`] when its subject does not parse.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Returns the lifetime applied to newly issued tokens.
    #[must_use]
    fn ttl(&self) -> Duration;
}
