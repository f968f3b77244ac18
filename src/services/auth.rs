//! Authentication service for registration, login, and token resolution.

use crate::{
    domain::{NewUser, User, UserId},
    ports::{PasswordHasher, TokenIssuer, UserRepository},
    services::{AppError, AppResult},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shortest plaintext password accepted at registration.
const PASSWORD_MIN: usize = 8;

/// Longest plaintext password accepted at registration.
const PASSWORD_MAX: usize = 100;

/// Payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    /// Email address for the account.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

/// Payload for logging in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    /// Login name of the account.
    pub username: String,
    /// Plaintext password to check.
    pub password: String,
}

/// Public view of a user account.
///
/// Deliberately omits the password hash so the view can cross any
/// transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// Account identifier.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Whether the account may log in.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Builds the public view of a user account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_owned(),
            username: user.username().to_owned(),
            full_name: user.full_name().to_owned(),
            is_active: user.is_active(),
            created_at: user.created_at(),
        }
    }
}

/// Bearer token handed out on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    /// Signed token string.
    pub access_token: String,
    /// Token scheme, always `bearer`.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Account registration, credential checking, and token resolution.
#[derive(Clone)]
pub struct AuthService<U, P, T, C>
where
    U: UserRepository,
    P: PasswordHasher,
    T: TokenIssuer,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    hasher: Arc<P>,
    tokens: Arc<T>,
    clock: Arc<C>,
}

impl<U, P, T, C> AuthService<U, P, T, C>
where
    U: UserRepository,
    P: PasswordHasher,
    T: TokenIssuer,
    C: Clock + Send + Sync,
{
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new(users: Arc<U>, hasher: Arc<P>, tokens: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    /// Registers a new account and returns its public profile.
    ///
    /// The email is checked for uniqueness before the username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when a field fails validation,
    /// [`AppError::Conflict`] when the email or username is already taken,
    /// or [`AppError::Internal`] when hashing or storage fails.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserProfile> {
        validate_password(&request.password)?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict("a user with this email already exists"));
        }
        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "a user with this username already exists",
            ));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(
            NewUser {
                email: request.email,
                username: request.username,
                full_name: request.full_name,
                password_hash,
            },
            self.clock.as_ref(),
        )?;
        self.users.create(&user).await?;

        Ok(UserProfile::from_user(&user))
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// An unknown username and a wrong password produce the same error, so
    /// the response does not reveal which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Authentication`] when the credentials do not
    /// match an active account, or [`AppError::Internal`] when the hash
    /// check or token signing fails.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AccessToken> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::authentication("invalid credentials"))?;
        if !self.hasher.verify(&request.password, user.password_hash())? {
            return Err(AppError::authentication("invalid credentials"));
        }
        if !user.is_active() {
            return Err(AppError::authentication("inactive user"));
        }

        let access_token = self.tokens.issue(user.id(), user.username())?;
        Ok(AccessToken {
            access_token,
            token_type: "bearer".to_owned(),
            expires_in: self.tokens.ttl().num_seconds(),
        })
    }

    /// Resolves a bearer token to the active account it identifies.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Authentication`] when the token is rejected,
    /// the account no longer exists, or the account is inactive.
    pub async fn resolve_current_user(&self, token: &str) -> AppResult<UserProfile> {
        let claims = self.tokens.verify(token)?;
        let user = self
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("user not found"))?;
        if !user.is_active() {
            return Err(AppError::authentication("inactive user"));
        }
        Ok(UserProfile::from_user(&user))
    }
}

/// Enforces the password length window before any hashing work.
fn validate_password(password: &str) -> AppResult<()> {
    let length = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
        return Err(AppError::validation(format!(
            "password must be {PASSWORD_MIN} to {PASSWORD_MAX} characters"
        )));
    }
    Ok(())
}
