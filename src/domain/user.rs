//! User aggregate for registration and authentication.

use super::{DomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const FULL_NAME_MAX: usize = 100;

/// Registered account holder.
///
/// Uniqueness of email and username across all users is enforced by the
/// registration use case and backed by storage constraints; the entity itself
/// validates only field shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    username: String,
    full_name: String,
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique email address.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Opaque password hash produced by the security port.
    pub password_hash: String,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: String,
    /// Persisted login name.
    pub username: String,
    /// Persisted display name.
    pub full_name: String,
    /// Persisted password hash.
    pub password_hash: String,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new active user from registration data.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmail`] when the email lacks a
    /// `local@domain` shape, [`DomainError::InvalidUsernameLength`] when the
    /// username is outside 3 to 50 characters, or
    /// [`DomainError::InvalidFullNameLength`] when the full name is outside
    /// 1 to 100 characters.
    pub fn new(data: NewUser, clock: &impl Clock) -> Result<Self, DomainError> {
        validate_email(&data.email)?;

        let username_len = data.username.chars().count();
        if username_len < USERNAME_MIN || username_len > USERNAME_MAX {
            return Err(DomainError::InvalidUsernameLength(username_len));
        }

        let full_name_len = data.full_name.chars().count();
        if full_name_len == 0 || full_name_len > FULL_NAME_MAX {
            return Err(DomainError::InvalidFullNameLength(full_name_len));
        }

        Ok(Self {
            id: UserId::new(),
            email: data.email,
            username: data.username,
            full_name: data.full_name,
            password_hash: data.password_hash,
            is_active: true,
            created_at: clock.utc(),
            updated_at: None,
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            username: data.username,
            full_name: data.full_name,
            password_hash: data.password_hash,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns whether the account may authenticate.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Checks for a minimal `local@domain` email shape: non-empty local part and
/// a dotted domain. Full RFC validation stays at the transport boundary.
fn validate_email(email: &str) -> Result<(), DomainError> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidEmail(email.to_owned()))
    }
}
