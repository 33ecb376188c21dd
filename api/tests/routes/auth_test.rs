use axum::{body::Body, http::Request, http::StatusCode};
use serde_json::json;
use serial_test::serial;

use crate::helpers::{json_body, make_test_app, send};

fn register_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("Content-Type", "application/json")
        .body(json_body(body))
        .unwrap()
}

fn login_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("Content-Type", "application/json")
        .body(json_body(body))
        .unwrap()
}

#[tokio::test]
#[serial]
async fn register_creates_account() {
    let (app, _db) = make_test_app().await;

    let (status, json) = send(
        &app,
        register_request(json!({
            "name": "Alice",
            "email": "alice@school.test",
            "password": "secret123",
            "role": "student"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "alice@school.test");
    assert_eq!(json["data"]["role"], "student");
    // The hash never leaves the server.
    assert!(json["data"].get("password_hash").is_none());
}

#[tokio::test]
#[serial]
async fn register_rejects_duplicate_email() {
    let (app, _db) = make_test_app().await;

    let body = json!({
        "name": "Alice",
        "email": "alice@school.test",
        "password": "secret123",
        "role": "student"
    });
    let (status, _) = send(&app, register_request(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, register_request(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn register_rejects_invalid_payload() {
    let (app, _db) = make_test_app().await;

    let (status, json) = send(
        &app,
        register_request(json!({
            "name": "",
            "email": "not-an-email",
            "password": "short",
            "role": "student"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
#[serial]
async fn login_returns_usable_token() {
    let (app, _db) = make_test_app().await;

    send(
        &app,
        register_request(json!({
            "name": "Teach",
            "email": "teach@school.test",
            "password": "secret123",
            "role": "teacher"
        })),
    )
    .await;

    let (status, json) = send(
        &app,
        login_request(json!({
            "email": "teach@school.test",
            "password": "secret123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user"]["role"], "teacher");
    let token = json["data"]["token"].as_str().unwrap().to_string();

    // The token actually authenticates requests.
    let req = Request::builder()
        .method("GET")
        .uri("/api/assignments")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn login_rejects_wrong_password() {
    let (app, _db) = make_test_app().await;

    send(
        &app,
        register_request(json!({
            "name": "Alice",
            "email": "alice@school.test",
            "password": "secret123",
            "role": "student"
        })),
    )
    .await;

    let (status, json) = send(
        &app,
        login_request(json!({
            "email": "alice@school.test",
            "password": "wrong-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);

    let (status, _) = send(
        &app,
        login_request(json!({
            "email": "nobody@school.test",
            "password": "secret123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
