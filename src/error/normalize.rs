//! # Error Normalizers
//!
//! Pure, one-shot translators from each failure category into the uniform
//! `{statusCode, message, errorSources}` triple. A fresh value is produced
//! per failure; nothing here mutates or caches.

use axum::http::StatusCode;

use super::{AppError, ErrorSource};

/// The uniform error triple consumed by the response writer
#[derive(Debug, Clone)]
pub struct NormalizedError {
    pub status_code: StatusCode,
    pub message: String,
    pub error_sources: Vec<ErrorSource>,
}

/// Dispatch an application error to its category normalizer
pub fn normalize(err: &AppError) -> NormalizedError {
    match err {
        AppError::Cast { path, value } => normalize_cast(path, value),
        AppError::Validation(sources) => normalize_validation(sources),
        AppError::BodySchema { message } => normalize_body_schema(message),
        AppError::Auth(auth) => NormalizedError {
            status_code: auth.status_code(),
            message: auth.to_string(),
            error_sources: vec![ErrorSource::new("", auth.to_string())],
        },
        AppError::NotFound => NormalizedError {
            status_code: StatusCode::NOT_FOUND,
            message: "Resource not found".to_string(),
            error_sources: vec![ErrorSource::new("", "Resource not found")],
        },
        AppError::DuplicateEmail => NormalizedError {
            status_code: StatusCode::CONFLICT,
            message: "Email already registered".to_string(),
            error_sources: vec![ErrorSource::new("email", "Email already registered")],
        },
        // Anything without a matching normalizer surfaces as a generic failure
        AppError::Internal(_) => NormalizedError {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Something went wrong".to_string(),
            error_sources: Vec::new(),
        },
    }
}

/// Cast failures carry exactly one invalid path
pub fn normalize_cast(path: &str, value: &str) -> NormalizedError {
    NormalizedError {
        status_code: StatusCode::BAD_REQUEST,
        message: "Invalid value".to_string(),
        error_sources: vec![ErrorSource::new(
            path,
            format!("'{}' is not a valid value for {}", value, path),
        )],
    }
}

/// Validation failures carry one source per invalid field, order preserved
pub fn normalize_validation(sources: &[ErrorSource]) -> NormalizedError {
    NormalizedError {
        status_code: StatusCode::BAD_REQUEST,
        message: "Validation failed".to_string(),
        error_sources: sources.to_vec(),
    }
}

/// Body-schema failures collapse to a single source at path `body`
pub fn normalize_body_schema(message: &str) -> NormalizedError {
    NormalizedError {
        status_code: StatusCode::BAD_REQUEST,
        message: "Request body validation failed".to_string(),
        error_sources: vec![ErrorSource::new("body", message)],
    }
}
