//! JSON Web Token adapter for access token handling.

use crate::domain::UserId;
use crate::ports::{TokenClaims, TokenError, TokenIssuer};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire representation of the claims carried by issued tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Authenticated user identifier.
    sub: String,
    /// Username recorded at issue time.
    username: String,
    /// Issue timestamp, seconds since the epoch.
    iat: i64,
    /// Expiry timestamp, seconds since the epoch.
    exp: i64,
}

/// HMAC-signed JWT issuer.
///
/// Tokens carry the user identifier as the `sub` claim and expire after the
/// configured lifetime. Verification checks the signature and expiry with
/// the default validation rules, so expiry is judged against real time
/// rather than an injected clock.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenIssuer {
    /// Creates an issuer signing with the given secret.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: UserId, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiry = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_owned(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::signing)
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;
        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::MalformedClaims)?;
        Ok(TokenClaims {
            user_id: UserId::from_uuid(user_id),
            username: data.claims.username,
        })
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
