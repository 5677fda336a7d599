use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{JsonBody, UuidPath};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{UserPayload, UserResponse, today};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// Create a new user
///
/// POST /users
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(payload): JsonBody<UserPayload>,
) -> UserResult<Response> {
    let today = today();
    let user = payload.validate(today)?;

    if !service.is_email_unique(&user.email).await? {
        return Err(UserError::DuplicateEmail);
    }

    let created = service.create_user(user).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from_user(created, today)),
    )
        .into_response())
}

/// List all users
///
/// GET /users
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let today = today();
    let users = service.list_users().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| UserResponse::from_user(u, today))
            .collect(),
    ))
}

/// Get a user by ID
///
/// GET /users/{id}
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?.ok_or(UserError::NotFound(id))?;
    Ok(Json(user.into()))
}

/// Replace a user. The email may stay the same but must not belong to anyone else.
///
/// PUT /users/{id}
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    JsonBody(payload): JsonBody<UserPayload>,
) -> UserResult<Json<UserResponse>> {
    let today = today();
    let user = payload.validate(today)?;

    let same_email = service.list_users_with_same_email(&user.email).await?;
    if same_email.iter().any(|u| u.id != id) {
        return Err(UserError::DuplicateEmail);
    }

    let updated = service
        .update_user(id, user)
        .await?
        .ok_or(UserError::NotFound(id))?;

    Ok(Json(UserResponse::from_user(updated, today)))
}

/// Delete a user
///
/// DELETE /users/{id}
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    if service.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(UserError::NotFound(id))
    }
}
