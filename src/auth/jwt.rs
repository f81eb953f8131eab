//! # JWT Verification
//!
//! Stateless token verification against a shared secret. Verification is a
//! single synchronous attempt; every failure kind maps to the same
//! `Unauthorized` error with a fixed message.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::users::Role;

use super::{AuthError, AuthResult};

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// User's email
    pub email: String,

    /// User's role
    pub role: Role,

    /// Issued at (Unix epoch seconds)
    pub iat: i64,

    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

impl Claims {
    /// Reject claims that do not carry the admin role
    pub fn require_admin(&self) -> AuthResult<()> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Verifies (and, for tooling and tests, signs) access tokens
#[derive(Clone)]
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl TokenVerifier {
    /// Create a verifier from the shared secret
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a signed token for the given subject
    pub fn sign(&self, sub: &str, email: &str, role: Role) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Verify a token and extract its claims.
    ///
    /// Any failure (expired, malformed, signature mismatch) yields
    /// `AuthError::Unauthorized`; the cause is deliberately discarded.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthorized)
    }
}
