//! Handler tests for the Accounts domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error body shape
//!
//! They exercise only the accounts handlers over the in-memory stores,
//! not the full application with routing and middleware.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_accounts::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

type TestService = AccountService<InMemoryUserRepository, InMemoryRoleRepository>;

fn service() -> (TestService, InMemoryRoleRepository) {
    let roles = InMemoryRoleRepository::new();
    let svc = AccountService::new(InMemoryUserRepository::new(), roles.clone());
    (svc, roles)
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_create_user_handler_returns_201() {
    let (svc, _roles) = service();
    let app = handlers::router(svc);

    let request = post_json(
        "/",
        json!({
            "login": "nikita-bayderin",
            "password": "9U)Hf(r"
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], 1);
    assert_eq!(body["login"], "nikita-bayderin");
    assert_eq!(body["roles"], json!([]));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_user_handler_reports_ordered_errors() {
    let (svc, _roles) = service();
    let app = handlers::router(svc);

    // A weak password accumulates both complexity violations.
    let request = post_json(
        "/",
        json!({
            "login": "dmitry-bogatyrev",
            "password": "hcvnnwxfdbvdh"
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 400);
    assert_eq!(
        body["errors"],
        json!([
            "password must contains at least one numeric character",
            "password must contains at least one capital letter"
        ])
    );
}

#[tokio::test]
async fn test_create_user_handler_reports_missing_fields() {
    let (svc, _roles) = service();
    let app = handlers::router(svc);

    let response = app.oneshot(post_json("/", json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["errors"],
        json!(["login was not provided", "password was not provided"])
    );
}

#[tokio::test]
async fn test_get_user_handler_returns_404_for_missing() {
    let (svc, _roles) = service();
    let app = handlers::router(svc);

    let request = Request::builder()
        .method("GET")
        .uri("/42")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["errors"][0], "user with id 42 has not found");
}

#[tokio::test]
async fn test_get_all_users_handler_lists_created_users() {
    let (svc, _roles) = service();

    for (login, password) in [("nikita-bayderin", "9U)Hf(r"), ("alex", "Qwe1")] {
        svc.create(CreateUserPayload {
            login: Some(login.to_string()),
            password: Some(password.to_string()),
        })
        .await
        .unwrap();
    }

    let app = handlers::router(svc);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["login"], "nikita-bayderin");
    assert_eq!(users[1]["login"], "alex");
}

#[tokio::test]
async fn test_update_user_handler_assigns_roles() {
    let (svc, roles) = service();
    let admin = roles.insert("admin").await.unwrap();

    let user = svc
        .create(CreateUserPayload {
            login: Some("nikita-bayderin".to_string()),
            password: Some("9U)Hf(r".to_string()),
        })
        .await
        .unwrap();

    let app = handlers::router(svc);

    let request = put_json(
        &format!("/{}", user.id),
        json!({ "roles": [admin.id] }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["roles"][0]["name"], "admin");
}

#[tokio::test]
async fn test_update_user_handler_reports_missing_role() {
    let (svc, _roles) = service();

    let user = svc
        .create(CreateUserPayload {
            login: Some("nikita-bayderin".to_string()),
            password: Some("9U)Hf(r".to_string()),
        })
        .await
        .unwrap();

    let app = handlers::router(svc);

    let request = put_json(&format!("/{}", user.id), json!({ "roles": [42] }));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["errors"][0], "role with id 42 has not found");
}

#[tokio::test]
async fn test_update_user_handler_clears_roles_with_empty_list() {
    let (svc, roles) = service();
    let admin = roles.insert("admin").await.unwrap();

    let user = svc
        .create(CreateUserPayload {
            login: Some("nikita-bayderin".to_string()),
            password: Some("9U)Hf(r".to_string()),
        })
        .await
        .unwrap();
    svc.update(
        user.id,
        UpdateUserPayload {
            roles: Some(vec![admin.id]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let app = handlers::router(svc);

    let request = put_json(&format!("/{}", user.id), json!({ "roles": [] }));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["roles"], json!([]));
}

#[tokio::test]
async fn test_update_user_handler_returns_404_for_missing() {
    let (svc, _roles) = service();
    let app = handlers::router(svc);

    let request = put_json("/7", json!({ "login": "ghost" }));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["errors"][0], "user with id 7 has not found");
}

#[tokio::test]
async fn test_delete_user_handler_returns_id_even_when_absent() {
    let (svc, _roles) = service();
    let app = handlers::router(svc);

    for _ in 0..2 {
        let request = Request::builder()
            .method("DELETE")
            .uri("/5")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await, json!(5));
    }
}
