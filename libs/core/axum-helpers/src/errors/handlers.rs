use axum::response::{IntoResponse, Response};

use super::{AppError, ErrorCode};

/// Fallback for routes that do not exist.
pub async fn not_found() -> Response {
    AppError::NotFound(ErrorCode::NotFound.default_message().to_string()).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = axum::Json(super::ErrorResponse::new(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
    ));

    (axum::http::StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
