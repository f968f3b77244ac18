//! Application error taxonomy shared by all services.
//!
//! Services collapse domain, storage, and security failures into a single
//! closed set of kinds so callers can translate outcomes into transport
//! responses without inspecting adapter internals.

use crate::{
    domain::DomainError,
    ports::{PasswordHashError, StorageError, TokenError},
};
use std::sync::Arc;
use thiserror::Error;

/// Result type for application service operations.
pub type AppResult<T> = Result<T, AppError>;

/// Classification of an [`AppError`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// The caller is not allowed to act on the entity.
    Authorization,
    /// The caller could not be identified.
    Authentication,
    /// The request collides with existing state.
    Conflict,
    /// The request payload failed validation.
    Validation,
    /// An infrastructure failure outside the caller's control.
    Internal,
}

/// Errors surfaced by application services.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// A referenced entity does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Kind of entity that was looked up.
        resource: &'static str,
    },

    /// The caller is authenticated but not permitted to act.
    #[error("{0}")]
    Authorization(String),

    /// The caller's identity could not be established.
    #[error("{0}")]
    Authentication(String),

    /// The request collides with existing state.
    #[error("{0}")]
    Conflict(String),

    /// The request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Storage or security infrastructure failed.
    #[error("internal error: {0}")]
    Internal(Arc<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    /// Builds an [`AppError::NotFound`] for the given resource.
    #[must_use]
    pub const fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Builds an [`AppError::Authorization`] with the given message.
    #[must_use]
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    /// Builds an [`AppError::Authentication`] with the given message.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Builds an [`AppError::Conflict`] with the given message.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Builds an [`AppError::Validation`] with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wraps an infrastructure error.
    #[must_use]
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl ErrorKind {
    /// HTTP-equivalent status code for this kind.
    ///
    /// The crate carries no transport layer; a boundary maps outcomes onto
    /// its own responses through this table.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Authorization => 403,
            Self::Authentication => 401,
            Self::Conflict => 409,
            Self::Validation => 400,
            Self::Internal => 500,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, .. } => Self::NotFound { resource: entity },
            StorageError::Duplicate { entity, field } => {
                Self::Conflict(format!("a {entity} with this {field} already exists"))
            }
            StorageError::Persistence(source) => Self::Internal(source),
        }
    }
}

impl From<PasswordHashError> for AppError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::Backend(source) => Self::Internal(source),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::MalformedClaims => {
                Self::Authentication(err.to_string())
            }
            TokenError::Signing(source) => Self::Internal(source),
        }
    }
}
