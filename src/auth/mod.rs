//! # Auth Module
//!
//! JWT verification and the request extractor that feeds verified claims to
//! route handlers. Signup/login flows are out of scope; tokens are minted by
//! tooling and tests via [`TokenVerifier::sign`].

pub mod extract;
pub mod jwt;

use axum::http::StatusCode;
use thiserror::Error;

pub use extract::AuthUser;
pub use jwt::{Claims, TokenVerifier};

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors.
///
/// Verification failures all collapse into `Unauthorized`; the underlying
/// cause (expiry, malformed token, bad signature) is discarded so it can
/// never leak to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Token missing, malformed, expired or signed with the wrong secret
    #[error("You are not authorized")]
    Unauthorized,

    /// Authenticated but lacking the required role
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// Token signing failed
    #[error("internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
