//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: Request/response logging and security headers
//! - **[`errors`]**: Error envelope with error codes, problem details for unhandled failures
//! - **[`extractors`]**: UUID path and JSON body extractors that answer 400 on bad input
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{Environment, server::ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let routes = Router::new().nest("/api", Router::new());
//!     let app = create_router(routes, &Environment::Development);
//!
//!     create_production_app(app, &ServerConfig::default(), std::time::Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{log_request_response, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse, ProblemDetails, UnhandledError};

// Re-export extractors
pub use extractors::{JsonBody, UuidPath};
