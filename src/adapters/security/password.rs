//! Bcrypt password hashing adapter.

use crate::ports::{PasswordHashError, PasswordHasher};

/// Work factor applied when hashing new passwords.
const BCRYPT_COST: u32 = 12;

/// Bcrypt-backed password hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptPasswordHasher;

impl BcryptPasswordHasher {
    /// Creates a hasher with the standard work factor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(plain, BCRYPT_COST).map_err(PasswordHashError::backend)
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(plain, hash).map_err(PasswordHashError::backend)
    }
}
