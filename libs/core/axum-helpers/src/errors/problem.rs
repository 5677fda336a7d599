//! RFC 7807 problem details for failures that escape the domain error types.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tracing_error::SpanTrace;

use super::ErrorCode;

pub const INTERNAL_ERROR_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.1";
pub const INTERNAL_ERROR_TITLE: &str = "An error occurred while processing your request.";
pub const PROBLEM_JSON: &str = "application/problem+json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
}

impl ProblemDetails {
    /// The generic 500 payload; carries no detail about the cause.
    pub fn internal_server_error() -> Self {
        Self {
            problem_type: INTERNAL_ERROR_TYPE.to_string(),
            title: INTERNAL_ERROR_TITLE.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match serde_json::to_vec(&self) {
            Ok(body) => (
                status,
                [(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON))],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize problem details: {}", e);
                status.into_response()
            }
        }
    }
}

/// A failure nothing else handled, with the span trace where it was caught.
///
/// Inserted as a request or response extension so the error endpoint can report it.
#[derive(Debug, Clone)]
pub struct UnhandledError {
    pub message: String,
    pub span_trace: SpanTrace,
}

impl UnhandledError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "handler panicked with a non-string payload".to_string()
        };

        Self::new(message)
    }
}

impl fmt::Display for UnhandledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Log the pending failure, if any, at ERROR and answer with the generic 500 problem.
pub fn report_unhandled(error: Option<&UnhandledError>) -> Response {
    if let Some(error) = error {
        tracing::error!("UNHANDLED EXCEPTION OCCURRED AND IS BEING LOGGED AS ERROR");
        tracing::error!(error_code = ErrorCode::UnhandledPanic.code(), "{}", error.message);
        tracing::error!("{}", error.span_trace);
    }

    ProblemDetails::internal_server_error().into_response()
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let error = UnhandledError::from_panic(payload);
    let mut response = report_unhandled(Some(&error));
    response.extensions_mut().insert(error);
    response
}
