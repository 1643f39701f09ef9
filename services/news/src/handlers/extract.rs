use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::NewsServiceError;

/// JSON body that has been deserialized and passed `Validate`.
///
/// Malformed JSON is rejected as `INVALID_FORM`; rule violations as `VALIDATION`
/// with per-field messages.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = NewsServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| NewsServiceError::InvalidForm(rejection.body_text()))?;
        value.validate().map_err(NewsServiceError::Validation)?;
        Ok(Self(value))
    }
}
