//! Credential adapters: bcrypt password hashing and JWT access tokens.

mod password;
mod token;

pub use password::BcryptPasswordHasher;
pub use token::JwtTokenIssuer;
