mod common;

use axum::http::StatusCode;
use common::{create_drama, create_episode, get, post, put, register_user, send, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_reviews_are_unique_and_owned() {
    let app = spawn_app().await;
    let drama = create_drama(&app, json!({ "title": "Review Bait" })).await;
    let series_id = drama["id"].as_i64().unwrap();

    let (_, alice) = register_user(&app, "alice").await;
    let (_, bob) = register_user(&app, "bob").await;

    let (status, review) = post(
        &app,
        "/api/v1/reviews",
        Some(&alice),
        json!({ "series_id": series_id, "rating": 4.5, "comment": "  Loved it  " }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["data"]["username"], "alice");
    assert_eq!(review["data"]["comment"], "Loved it");
    let review_id = review["data"]["id"].as_i64().unwrap();

    let (status, body) = post(
        &app,
        "/api/v1/reviews",
        Some(&alice),
        json!({ "series_id": series_id, "rating": 3.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You have already reviewed this drama series.");

    let (status, _) = post(
        &app,
        "/api/v1/reviews",
        Some(&bob),
        json!({ "series_id": series_id, "rating": 6.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/v1/reviews",
        Some(&bob),
        json!({ "series_id": 9999, "rating": 2.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Someone else's review looks missing
    let (status, _) = put(
        &app,
        &format!("/api/v1/reviews/{review_id}"),
        Some(&bob),
        json!({ "rating": 1.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/api/v1/reviews/{review_id}"), Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = put(
        &app,
        &format!("/api/v1/reviews/{review_id}"),
        Some(&alice),
        json!({ "rating": 2.0, "comment": "Second thoughts" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["rating"], 2.0);

    post(
        &app,
        "/api/v1/reviews",
        Some(&bob),
        json!({ "series_id": series_id, "rating": 4.0 }),
    )
    .await;

    let (status, reviews) = get(&app, "/api/v1/dramas/review-bait/reviews", Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews["data"].as_array().unwrap().len(), 2);

    let (_, detail) = get(&app, "/api/v1/dramas/review-bait", None).await;
    assert_eq!(detail["data"]["review_count"], 2);
    assert_eq!(detail["data"]["average_review_rating"], 3.0);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/reviews/{review_id}"), Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, reviews) = get(&app, "/api/v1/dramas/review-bait/reviews", Some(&alice)).await;
    assert_eq!(reviews["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reviews_require_authentication() {
    let app = spawn_app().await;
    create_drama(&app, json!({ "title": "Closed Doors" })).await;

    let (status, _) = get(&app, "/api/v1/dramas/closed-doors/reviews", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&app, "/api/v1/reviews", None, json!({ "series_id": 1, "rating": 3.0 })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_like_toggles() {
    let app = spawn_app().await;
    let drama = create_drama(&app, json!({ "title": "Heart Beat" })).await;
    let series_id = drama["id"].as_i64().unwrap();
    let (_, key) = register_user(&app, "liker").await;

    let (status, body) = post(&app, "/api/v1/likes", Some(&key), json!({ "series_id": series_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["data"]["like_count"], 1);

    let (_, likes) = get(&app, "/api/v1/likes", Some(&key)).await;
    assert_eq!(likes["data"][0]["slug"], "heart-beat");

    let (_, body) = post(&app, "/api/v1/likes", Some(&key), json!({ "series_id": series_id })).await;
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["like_count"], 0);

    let (_, likes) = get(&app, "/api/v1/likes", Some(&key)).await;
    assert!(likes["data"].as_array().unwrap().is_empty());

    let (status, _) = post(&app, "/api/v1/likes", Some(&key), json!({ "series_id": 4242 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_liked_category_drives_recommendations() {
    let app = spawn_app().await;
    let (_, key) = register_user(&app, "fan").await;

    let (_, category) = post(
        &app,
        "/api/admin/categories",
        Some(common::DEFAULT_API_KEY),
        json!({ "name": "Medical" }),
    )
    .await;
    let category_id = category["data"]["id"].clone();

    let liked = create_drama(&app, json!({ "title": "Night Shift", "rating": 6.0 })).await;
    create_drama(&app, json!({ "title": "Code Blue", "rating": 5.0 })).await;
    create_drama(&app, json!({ "title": "Unrelated Epic", "rating": 9.5 })).await;

    for slug in ["night-shift", "code-blue"] {
        put(
            &app,
            &format!("/api/admin/dramas/{slug}/categories"),
            Some(common::DEFAULT_API_KEY),
            json!({ "ids": [category_id] }),
        )
        .await;
    }

    post(&app, "/api/v1/likes", Some(&key), json!({ "series_id": liked["id"] })).await;

    let (_, home) = get(&app, "/api/v1/home", Some(&key)).await;
    let picks = home["data"]["you_might_like"].as_array().unwrap();
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0]["slug"], "code-blue");

    let (_, anonymous) = get(&app, "/api/v1/home", None).await;
    assert_eq!(anonymous["data"]["you_might_like"][0]["slug"], "unrelated-epic");
}

#[tokio::test]
async fn test_progress_upserts_single_row() {
    let app = spawn_app().await;
    create_drama(&app, json!({ "title": "Binge Night" })).await;
    let episode_id = create_episode(&app, "binge-night").await;
    let (_, key) = register_user(&app, "watcher").await;

    let (status, body) = post(
        &app,
        "/api/v1/progress",
        Some(&key),
        json!({ "episode_id": episode_id, "position_secs": 600 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completed"], false);

    let (_, home) = get(&app, "/api/v1/home", Some(&key)).await;
    let watching = &home["data"]["continue_watching"];
    assert_eq!(watching.as_array().unwrap().len(), 1);
    assert_eq!(watching[0]["series_slug"], "binge-night");
    assert_eq!(watching[0]["position_secs"], 600);

    // 45 minutes reached
    let (_, body) = post(
        &app,
        "/api/v1/progress",
        Some(&key),
        json!({ "episode_id": episode_id, "position_secs": 2700 }),
    )
    .await;
    assert_eq!(body["data"]["completed"], true);

    let (_, progress) = get(&app, "/api/v1/progress", Some(&key)).await;
    let rows = progress["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["position_secs"], 2700);

    let (_, home) = get(&app, "/api/v1/home", Some(&key)).await;
    assert!(home["data"]["continue_watching"].as_array().unwrap().is_empty());

    let (status, _) = post(
        &app,
        "/api/v1/progress",
        Some(&key),
        json!({ "episode_id": episode_id, "position_secs": -5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/v1/progress",
        Some(&key),
        json!({ "episode_id": 777, "position_secs": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
