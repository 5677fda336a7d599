//! JSON body extractor with the workspace error envelope.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but rejections use the standard envelope: 415 when the
/// body is not declared as JSON, 400 for anything that does not parse into `T`.
///
/// Field validation is left to the handler; this only guarantees the body
/// parsed into `T`.
///
/// # Example
/// ```ignore
/// async fn create(JsonBody(payload): JsonBody<UserPayload>) -> Response {
///     let user = payload.validate(today)?;
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(JsonBody(data))
    }
}
