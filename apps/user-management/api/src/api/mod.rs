use axum::Router;

pub mod health;
pub mod users;

/// API routes without the `/api` prefix; `main` nests them.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/users", users::router(state))
}

/// `/ready` with a real database check, merged outside the request logging.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
