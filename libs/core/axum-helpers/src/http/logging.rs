use axum::{
    body::{Body, HttpBody},
    extract::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::errors::{UnhandledError, problem::report_unhandled};

/// Response bodies above this size are passed through without being logged.
pub const MAX_LOGGED_BODY_BYTES: usize = 1024 * 1024;

const BODY_TOO_LARGE: &str = "<body too large to log>";

/// Logs every request line and the full response body.
///
/// The response body is buffered, logged and re-attached as the same bytes.
/// Bodies with no known size or larger than [`MAX_LOGGED_BODY_BYTES`] stream
/// through untouched.
pub async fn log_request_response(request: Request, next: Next) -> Response {
    info!(
        "Incoming request: {} {} {:?}",
        request.method(),
        request.uri().path(),
        request.headers()
    );

    let response = next.run(request).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_LOGGED_BODY_BYTES as u64);

    if !fits {
        info!("Outgoing response: {} {}", status, BODY_TOO_LARGE);
        return Response::from_parts(parts, body);
    }

    match axum::body::to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => {
            info!(
                "Outgoing response: {} {}",
                status,
                String::from_utf8_lossy(&bytes)
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            // The body is gone at this point
            warn!("Failed to buffer response body: {}", e);
            report_unhandled(Some(&UnhandledError::new(format!(
                "failed to buffer response body: {}",
                e
            ))))
        }
    }
}
