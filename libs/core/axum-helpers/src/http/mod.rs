//! HTTP middleware.
//!
//! - Request/response logging
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{log_request_response, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(log_request_response))
//!     .layer(axum::middleware::from_fn(security_headers));
//! ```

pub mod logging;
pub mod security;

pub use logging::{MAX_LOGGED_BODY_BYTES, log_request_response};
pub use security::security_headers;
