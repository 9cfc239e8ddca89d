use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::error::AppError;
use crate::models::Payload;

/// JSON body that must parse and validate; either failure is a 400 carrying
/// the payload's static message.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Payload,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(error = %rejection, "Rejected request body");
            AppError::Validation(T::INVALID.to_string())
        })?;
        value.validate().map_err(|errors| {
            debug!(error = %errors, "Request body failed validation");
            AppError::Validation(T::INVALID.to_string())
        })?;
        Ok(ValidJson(value))
    }
}
