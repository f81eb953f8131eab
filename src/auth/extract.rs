//! Bearer-token request extractor.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::http::AppState;

use super::{AuthError, Claims};

/// Verified claims of the calling user.
///
/// Reads the `Authorization: Bearer <token>` header and verifies it against
/// the application secret. A missing or invalid header rejects the request
/// with the normalized unauthorized response.
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::Unauthorized)?;

        let claims = state.verifier.verify(token)?;
        Ok(AuthUser(claims))
    }
}
