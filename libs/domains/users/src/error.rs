use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, ErrorCode, ProblemDetails};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email is already taken by another user.";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{}", DUPLICATE_EMAIL_MESSAGE)]
    DuplicateEmail,

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::Validation(errors) => AppError::Validation(errors).into_response(),
            UserError::DuplicateEmail => {
                AppError::BadRequest(DUPLICATE_EMAIL_MESSAGE.to_string()).into_response()
            }
            // Not-found answers carry no body
            UserError::NotFound(id) => {
                tracing::info!(user_id = %id, error_code = ErrorCode::NotFound.code(), "User not found");
                StatusCode::NOT_FOUND.into_response()
            }
            UserError::Database(e) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    e
                );
                ProblemDetails::internal_server_error().into_response()
            }
        }
    }
}
