mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{DEFAULT_API_KEY, get, post, put, register_user, send, spawn_app};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_auth_endpoints() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/v1/likes", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = get(&app, "/api/admin/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/api/admin/dashboard", Some("wrong-key")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&app, "/api/admin/dashboard", Some(DEFAULT_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"], 1);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {DEFAULT_API_KEY}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_staff_gets_forbidden_on_admin_routes() {
    let app = spawn_app().await;
    let (_, api_key) = register_user(&app, "viewer").await;

    let (status, _) = get(&app, "/api/admin/dashboard", Some(&api_key)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, "/api/system/status", Some(&api_key)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, "/api/v1/wallet", Some(&api_key)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let app = spawn_app().await;
    register_user(&app, "viewer").await;

    let (status, body) = post(
        &app,
        "/api/auth/register",
        None,
        json!({ "email": "viewer@example.com", "username": "other", "password": "correct-horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = post(
        &app,
        "/api/auth/register",
        None,
        json!({ "email": "short@example.com", "username": "short", "password": "abc" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_session_flow() {
    let app = spawn_app().await;

    let (status, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "login": "admin", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "login": "admin@localhost", "password": "password" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deactivated_user_is_rejected() {
    let app = spawn_app().await;
    let (_, api_key) = register_user(&app, "leaving").await;

    let (status, _) = post(
        &app,
        "/api/auth/deactivate",
        Some(&api_key),
        json!({ "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/auth/deactivate",
        Some(&api_key),
        json!({ "password": "correct-horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/auth/me", Some(&api_key)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "login": "leaving", "password": "correct-horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password_and_regenerate_key() {
    let app = spawn_app().await;
    let (_, api_key) = register_user(&app, "changer").await;

    let (status, _) = put(
        &app,
        "/api/auth/password",
        Some(&api_key),
        json!({ "current_password": "not-it", "new_password": "battery-staple" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put(
        &app,
        "/api/auth/password",
        Some(&api_key),
        json!({ "current_password": "correct-horse", "new_password": "battery-staple" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/auth/api-key/regenerate", Some(&api_key), None).await;
    assert_eq!(status, StatusCode::OK);
    let new_key = body["data"]["api_key"].as_str().unwrap().to_string();
    assert_ne!(new_key, api_key);

    let (status, _) = get(&app, "/api/auth/me", Some(&api_key)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = get(&app, "/api/auth/me", Some(&new_key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "changer");
    assert!(body["data"].get("api_key").is_none());
}

#[tokio::test]
async fn test_delete_account() {
    let app = spawn_app().await;
    let (user_id, api_key) = register_user(&app, "gone").await;

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/auth/account",
        Some(&api_key),
        Some(json!({ "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/api/admin/users/{user_id}"), Some(DEFAULT_API_KEY)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_system_endpoints() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/system/health/live", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = get(&app, "/api/system/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);

    let (status, _) = get(&app, "/api/system/status", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&app, "/api/system/status", Some(DEFAULT_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["data"]["users"], 1);
}
