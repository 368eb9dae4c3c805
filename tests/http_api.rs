use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use stackly_auth::{
    AppState, Config, routes,
    storage::{DisabledStore, MemoryStore},
};

fn test_config() -> Config {
    Config {
        processing_delay: Duration::ZERO,
        ..Config::default()
    }
}

fn app() -> Router {
    let state = AppState::with_storage(&test_config(), Arc::new(MemoryStore::new()));
    routes::router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let request = request.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_register_login_logout() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@x.com", "password": "p1", "firstname": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@x.com", "password": "p2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session"].is_null());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["displayName"], "A");
    assert!(body["user"]["lastLoginTime"].is_string());

    let (_, body) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(body["session"]["email"], "a@x.com");

    let (status, _) = send(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/auth/session", None).await;
    assert!(body["session"].is_null());
}

#[tokio::test]
async fn test_error_statuses() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password is required");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/password-reset",
        Some(json!({ "email": "nobody@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_reset() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@x.com", "password": "old" })),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/password-reset",
        Some(json!({ "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/password-reset/complete",
        Some(json!({ "email": "a@x.com", "newPassword": "new", "confirmPassword": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/password-reset/complete",
        Some(json!({ "email": "a@x.com", "newPassword": "new", "confirmPassword": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com", "password": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_users_table() {
    let app = app();
    for email in ["first@x.com", "second@x.com"] {
        send(
            &app,
            "POST",
            "/api/auth/register",
            Some(json!({ "email": email, "password": "p1" })),
        )
        .await;
    }

    let (status, _) = send(&app, "GET", "/api/admin/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "first@x.com", "password": "p1" })),
    )
    .await;
    let (status, _) = send(&app, "GET", "/api/admin/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "admin@stackly.com", "password": "admin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");

    let (status, body) = send(&app, "GET", "/api/admin/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["users"][0]["email"], "first@x.com");
    assert_eq!(body["users"][1]["email"], "second@x.com");
    assert!(body["users"][0].get("password").is_none());
}

#[tokio::test]
async fn test_disabled_storage_degrades() {
    let state = AppState::with_storage(&test_config(), Arc::new(DisabledStore));
    let app = routes::router(state);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "email": "a@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session"].is_null());
}

#[tokio::test]
async fn test_malformed_body() {
    let app = app();

    let (status, body) = send_raw(&app, "/api/auth/login", Some("application/json"), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(
        &app,
        "/api/auth/login",
        None,
        r#"{"email":"a@x.com","password":"p1"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let (status, body) = send_raw(
        &app,
        "/api/auth/password-reset/complete",
        Some("application/json"),
        r#"{"email":"a@x.com","newPassword":42}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/api/auth/session", None).await;
    assert!(body["session"].is_null());
}
