//! Error types for domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain entities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the 200-character limit.
    #[error("title length {0} exceeds the maximum of 200 characters")]
    TitleTooLong(usize),

    /// The description exceeds the entity-specific limit.
    #[error("description length {length} exceeds the maximum of {max} characters")]
    DescriptionTooLong {
        /// Supplied description length in characters.
        length: usize,
        /// Maximum permitted length for this entity.
        max: usize,
    },

    /// The email address does not have a `local@domain` shape.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The username is outside the 3 to 50 character range.
    #[error("username length {0} must be between 3 and 50 characters")]
    InvalidUsernameLength(usize),

    /// The full name is outside the 1 to 100 character range.
    #[error("full name length {0} must be between 1 and 100 characters")]
    InvalidFullNameLength(usize),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
