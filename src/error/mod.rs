//! # Application Errors
//!
//! Every failure category is converted at the response boundary into one
//! uniform shape: `{statusCode, message, errorSources}`. Normalization is
//! handled by the pure functions in [`normalize`]; this module owns the
//! taxonomy and the axum response glue.

pub mod extract;
pub mod normalize;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

pub use extract::AppJson;
pub use normalize::NormalizedError;

/// Result type for request handling
pub type AppResult<T> = Result<T, AppError>;

/// One invalid path within a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSource {
    pub path: String,
    pub message: String,
}

impl ErrorSource {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Application error taxonomy
#[derive(Debug, Error)]
pub enum AppError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// A value could not be coerced to the expected type
    #[error("invalid value '{value}' for {path}")]
    Cast { path: String, value: String },

    /// One entry per invalid field, in declaration order
    #[error("validation failed")]
    Validation(Vec<ErrorSource>),

    /// Request body failed external schema validation (deserialization)
    #[error("request body validation failed: {message}")]
    BodySchema { message: String },

    /// Authentication / authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Resource not found
    #[error("resource not found")]
    NotFound,

    /// Email already registered
    #[error("email already registered")]
    DuplicateEmail,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Cast { .. } => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BodySchema { .. } => StatusCode::BAD_REQUEST,
            AppError::Auth(auth) => auth.status_code(),
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// JSON body of a normalized error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub error_sources: Vec<ErrorSource>,
}

impl From<NormalizedError> for ErrorBody {
    fn from(normalized: NormalizedError) -> Self {
        Self {
            success: false,
            status_code: normalized.status_code.as_u16(),
            message: normalized.message,
            error_sources: normalized.error_sources,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let normalized = normalize::normalize(&self);

        if normalized.status_code.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = normalized.status_code.as_u16(), "request rejected");
        }

        let status = normalized.status_code;
        (status, Json(ErrorBody::from(normalized))).into_response()
    }
}
