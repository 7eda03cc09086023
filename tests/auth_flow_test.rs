//! API tests for the token checks and request validation paths.
//!
//! These run the real router end to end; only paths that never reach
//! the database are exercised, so they pass without a Postgres.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use common::{send_json, test_app, TEST_SECRET};

#[derive(serde::Serialize)]
struct RawClaims {
    sub: Uuid,
    iat: i64,
    exp: i64,
}

fn sign(claims: &RawClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token")
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let (status, body) = send_json(test_app(), "GET", "/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["status_code"], 401);
}

#[tokio::test]
async fn test_me_with_garbage_token_is_malformed() {
    let (status, body) =
        send_json(test_app(), "GET", "/users/me", Some("not.a.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_MALFORMED");
}

#[tokio::test]
async fn test_me_with_expired_token_is_rejected() {
    let now = Utc::now().timestamp();
    let token = sign(
        &RawClaims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        },
        TEST_SECRET,
    );

    let (status, body) = send_json(test_app(), "GET", "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_me_with_wrong_secret_is_signature_invalid() {
    let now = Utc::now().timestamp();
    let token = sign(
        &RawClaims {
            sub: Uuid::new_v4(),
            iat: now,
            exp: now + 3600,
        },
        "some-other-secret",
    );

    let (status, body) = send_json(test_app(), "GET", "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_SIGNATURE_INVALID");
}

#[tokio::test]
async fn test_register_with_invalid_email_fails_validation() {
    let (status, body) = send_json(
        test_app(),
        "POST",
        "/users/register",
        None,
        Some(json!({"email": "not-an-email", "password": "long enough password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_register_with_short_password_fails_validation() {
    let (status, body) = send_json(
        test_app(),
        "POST",
        "/users/register",
        None,
        Some(json!({"email": "user@example.com", "password": "short"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn test_register_password_floor_comes_from_config() {
    // One below the configured minimum (8) is rejected before any store
    // work; exactly at the minimum passes validation and dies at the
    // unreachable test pool instead.
    let (status, body) = send_json(
        test_app(),
        "POST",
        "/users/register",
        None,
        Some(json!({"email": "user@example.com", "password": "seven77"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["password"][0]["code"], "length");

    let (status, body) = send_json(
        test_app(),
        "POST",
        "/users/register",
        None,
        Some(json!({"email": "user@example.com", "password": "eight888"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_login_with_empty_fields_fails_validation() {
    let (status, body) = send_json(
        test_app(),
        "POST",
        "/users/login",
        None,
        Some(json!({"email": "", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_roles_listing_requires_a_token() {
    let (status, _) = send_json(test_app(), "GET", "/roles", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_assign_roles_requires_a_token() {
    let (status, _) = send_json(
        test_app(),
        "POST",
        "/roles/assign",
        None,
        Some(json!({"user_id": Uuid::new_v4(), "roles_names": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_open_and_reports_database_state() {
    let (status, body) = send_json(test_app(), "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    // The test pool points at a closed port.
    assert_eq!(body["database"], "unreachable");
}
