//! JSON body extractor whose rejection uses the normalized error shape.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::AppError;

/// Drop-in replacement for `axum::Json` on request bodies.
///
/// Deserialization failures become [`AppError::BodySchema`] so the response
/// carries the uniform `{statusCode, message, errorSources}` triple instead
/// of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::BodySchema {
                message: rejection.body_text(),
            }),
        }
    }
}
