//! Handler tests for the users domain
//!
//! These drive the users router and the error endpoint directly with
//! `oneshot`, backed by the in-memory repository:
//! - Request parsing and field validation
//! - Status codes, headers and bodies
//! - Email uniqueness on create and update

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

fn app() -> Router {
    Router::new().nest(
        "/api/users",
        handlers::router(UserService::new(InMemoryUserRepository::new())),
    )
}

fn john() -> Value {
    json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": "john.doe@example.com",
        "date_of_birth": "1990-01-01",
        "phone_number": "1234567890"
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, body: &Value) -> UserResponse {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/users", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_user_returns_201_with_location() {
    let app = app();

    let response = app
        .oneshot(json_request("POST", "/api/users", &john()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let user: UserResponse = json_body(response.into_body()).await;
    assert!(!user.id.is_nil());
    assert_eq!(user.first_name, "John");
    assert_eq!(user.email, "john.doe@example.com");
    assert!(user.age >= 34);
    assert_eq!(location, format!("/api/users/{}", user.id));
}

#[tokio::test]
async fn test_create_user_ignores_client_id() {
    let app = app();
    let client_id = Uuid::now_v7();
    let mut body = john();
    body["id"] = json!(client_id);

    let user = create(&app, &body).await;

    assert_ne!(user.id, client_id);
}

#[tokio::test]
async fn test_create_duplicate_email_returns_400() {
    let app = app();
    create(&app, &john()).await;

    let mut second = john();
    second["first_name"] = json!("Johnny");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/users", &second))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Email is already taken by another user.");

    let response = app
        .oneshot(empty_request("GET", "/api/users"))
        .await
        .unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_create_user_validation_errors() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/users",
            &json!({
                "last_name": "Doe",
                "email": "not-an-email",
                "date_of_birth": "2020-01-01",
                "phone_number": "12345"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    let details = &body["details"];
    assert_eq!(details["first_name"][0]["message"], "The first_name field is required.");
    assert_eq!(
        details["email"][0]["message"],
        "The email field is not a valid e-mail address."
    );
    assert_eq!(details["date_of_birth"][0]["message"], "User must be at least 18 years old.");
    assert_eq!(details["phone_number"][0]["message"], "Phone number must be 10 digits long.");
}

#[tokio::test]
async fn test_create_user_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"first_name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_without_json_content_type_returns_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(serde_json::to_vec(&john()).unwrap()))
        .unwrap();

    let app = app();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let response = app
        .oneshot(empty_request("GET", "/api/users"))
        .await
        .unwrap();
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_list_users_returns_all() {
    let app = app();
    create(&app, &john()).await;
    let mut jane = john();
    jane["first_name"] = json!("Jane");
    jane["email"] = json!("jane.doe@example.com");
    create(&app, &jane).await;

    let response = app
        .oneshot(empty_request("GET", "/api/users"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    let names: Vec<_> = users.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, ["John", "Jane"]);
}

#[tokio::test]
async fn test_get_user_returns_stored_fields() {
    let app = app();
    let created = create(&app, &john()).await;

    let response = app
        .oneshot(empty_request("GET", &format!("/api/users/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user, created);
}

#[tokio::test]
async fn test_get_missing_user_returns_empty_404() {
    let response = app()
        .oneshot(empty_request(
            "GET",
            &format!("/api/users/{}", Uuid::now_v7()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_get_user_with_invalid_id_returns_400() {
    let response = app()
        .oneshot(empty_request("GET", "/api/users/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_keeps_id_and_own_email() {
    let app = app();
    let created = create(&app, &john()).await;

    let mut body = john();
    body["id"] = json!(Uuid::now_v7());
    body["first_name"] = json!("Johnny");

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", created.id),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.id, created.id);
    assert_eq!(user.first_name, "Johnny");
    assert_eq!(user.email, "john.doe@example.com");
}

#[tokio::test]
async fn test_update_user_to_taken_email_returns_400() {
    let app = app();
    let john = create(&app, &john()).await;
    let mut jane = self::john();
    jane["email"] = json!("jane.doe@example.com");
    create(&app, &jane).await;

    let mut body = self::john();
    body["email"] = json!("jane.doe@example.com");
    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/api/users/{}", john.id), &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Email is already taken by another user.");

    let response = app
        .oneshot(empty_request("GET", &format!("/api/users/{}", john.id)))
        .await
        .unwrap();
    let stored: UserResponse = json_body(response.into_body()).await;
    assert_eq!(stored.email, "john.doe@example.com");
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", Uuid::now_v7()),
            &john(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_update_user_validation_errors() {
    let app = app();
    let created = create(&app, &john()).await;

    let mut body = john();
    body["phone_number"] = json!("123");
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", created.id),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["details"]["phone_number"][0]["message"],
        "Phone number must be 10 digits long."
    );
}

#[tokio::test]
async fn test_delete_user_then_gone() {
    let app = app();
    let created = create(&app, &john()).await;
    let uri = format!("/api/users/{}", created.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response.into_body()).await.is_empty());

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_endpoint_returns_problem_details() {
    let response = error_handlers::router()
        .oneshot(empty_request("GET", "/error"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "type": "https://tools.ietf.org/html/rfc9110#section-15.6.1",
            "title": "An error occurred while processing your request.",
            "status": 500
        })
    );
}

#[tokio::test]
async fn test_error_endpoint_with_pending_error_hides_details() {
    let mut request = empty_request("GET", "/error");
    request
        .extensions_mut()
        .insert(axum_helpers::UnhandledError::new("secret connection string"));

    let response = error_handlers::router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(!body.contains("secret"));
}
