//! `GET /error`: the landing spot for failures nothing else handled.

use axum::{Router, extract::Request, response::Response, routing::get};
use axum_helpers::UnhandledError;
use axum_helpers::errors::problem::report_unhandled;

pub fn router() -> Router {
    Router::new().route("/error", get(handle_error))
}

/// Logs the pending [`UnhandledError`], if the request carries one, and
/// answers with the generic 500 problem details.
pub async fn handle_error(request: Request) -> Response {
    report_unhandled(request.extensions().get::<UnhandledError>())
}
