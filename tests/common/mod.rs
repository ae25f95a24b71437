#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use dramabox::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Default API key seeded by migration (must match m20250103_seed_admin.rs)
pub const DEFAULT_API_KEY: &str = "dramabox_default_api_key_please_regenerate";

pub async fn spawn_app() -> Router {
    let path = std::env::temp_dir().join(format!("dramabox-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", path.display());
    config.observability.metrics_enabled = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = dramabox::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    dramabox::api::router(state).await
}

pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Sends a request and returns the status with the parsed JSON body
/// (`Value::Null` for empty or non-JSON bodies).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-Api-Key", key);
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", mime::APPLICATION_JSON.as_ref())
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str, api_key: Option<&str>) -> (StatusCode, Value) {
    send(app, "GET", uri, api_key, None).await
}

pub async fn post(app: &Router, uri: &str, api_key: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, api_key, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, api_key: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, api_key, Some(body)).await
}

/// Registers a regular account and returns `(user_id, api_key)`.
pub async fn register_user(app: &Router, username: &str) -> (i64, String) {
    let (status, body) = post(
        app,
        "/api/auth/register",
        None,
        json!({
            "email": format!("{username}@example.com"),
            "username": username,
            "password": "correct-horse",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");

    (
        body["data"]["user"]["id"].as_i64().unwrap(),
        body["data"]["api_key"].as_str().unwrap().to_string(),
    )
}

/// Creates a drama as the bootstrap admin and returns its summary.
pub async fn create_drama(app: &Router, fields: Value) -> Value {
    let (status, body) = post(app, "/api/admin/dramas", Some(DEFAULT_API_KEY), fields).await;
    assert_eq!(status, StatusCode::OK, "create drama failed: {body}");
    body["data"].clone()
}

/// Creates season 1 with one 45 minute episode and returns the episode id.
pub async fn create_episode(app: &Router, slug: &str) -> i64 {
    let (status, season) = post(
        app,
        &format!("/api/admin/dramas/{slug}/seasons"),
        Some(DEFAULT_API_KEY),
        json!({ "season_number": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create season failed: {season}");
    let season_id = season["data"]["id"].as_i64().unwrap();

    let (status, episode) = post(
        app,
        &format!("/api/admin/seasons/{season_id}/episodes"),
        Some(DEFAULT_API_KEY),
        json!({
            "episode_number": 1,
            "title": "Pilot",
            "duration": "00:45:00",
            "video_file": "https://cdn.example.com/pilot.mp4",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create episode failed: {episode}");
    episode["data"]["id"].as_i64().unwrap()
}
