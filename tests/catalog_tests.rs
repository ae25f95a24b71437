mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{DEFAULT_API_KEY, create_drama, create_episode, get, post, put, spawn_app, today};
use serde_json::{Value, json};

fn titles(section: &Value) -> Vec<String> {
    section
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_home_classifies_sections() {
    let app = spawn_app().await;
    let today = today();

    create_drama(
        &app,
        json!({ "title": "Hot Streak", "rating": 8.1, "trending_threshold": 1 }),
    )
    .await;
    create_drama(
        &app,
        json!({ "title": "Cold Open", "rating": 6.0, "trending_threshold": 5 }),
    )
    .await;
    create_drama(
        &app,
        json!({
            "title": "Spotlight Today",
            "rating": 7.0,
            "is_featured": true,
            "featured_until": today.to_string(),
        }),
    )
    .await;
    create_drama(
        &app,
        json!({
            "title": "Spotlight Expired",
            "rating": 7.5,
            "is_featured": true,
            "featured_until": (today - Duration::days(1)).to_string(),
        }),
    )
    .await;
    create_drama(
        &app,
        json!({ "title": "Next Month", "rating": 5.0, "release_date": (today + Duration::days(30)).to_string() }),
    )
    .await;
    create_drama(
        &app,
        json!({ "title": "Out Now", "rating": 5.5, "release_date": today.to_string() }),
    )
    .await;

    // One view reaches a threshold of one
    let (status, _) = get(&app, "/api/v1/dramas/hot-streak", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/api/v1/home", None).await;
    assert_eq!(status, StatusCode::OK);
    let home = &body["data"];

    assert_eq!(titles(&home["trending_dramas"]), vec!["Hot Streak"]);
    assert_eq!(titles(&home["featured_dramas"]), vec!["Spotlight Today"]);
    assert_eq!(titles(&home["upcoming_dramas"]), vec!["Next Month"]);
    assert_eq!(titles(&home["top_ten"])[0], "Hot Streak");
    assert_eq!(titles(&home["most_popular"])[0], "Hot Streak");
    assert_eq!(home["new_dramas"].as_array().unwrap().len(), 6);
    assert!(home["continue_watching"].as_array().unwrap().is_empty());
    assert_eq!(titles(&home["you_might_like"])[0], "Hot Streak");

    let trending = &home["trending_dramas"][0];
    assert_eq!(trending["is_trending"], true);
    assert_eq!(trending["view_count"], 1);
    assert_eq!(home["featured_dramas"][0]["is_currently_featured"], true);
    assert_eq!(home["upcoming_dramas"][0]["is_upcoming"], true);
}

#[tokio::test]
async fn test_list_filters_and_pagination() {
    let app = spawn_app().await;

    create_drama(&app, json!({ "title": "Moonlight Palace", "trending_threshold": 0 })).await;
    create_drama(&app, json!({ "title": "Office Hours", "description": "A moon rises over Seoul" })).await;
    let third = create_drama(&app, json!({ "title": "Quiet River" })).await;

    let (status, body) = get(&app, "/api/v1/dramas?page=1&page_size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 3);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(titles(&body["data"]["results"]), vec!["Moonlight Palace", "Office Hours"]);

    let (_, body) = get(&app, "/api/v1/dramas?page=2&page_size=2", None).await;
    assert_eq!(titles(&body["data"]["results"]), vec!["Quiet River"]);

    let (_, body) = get(&app, "/api/v1/dramas?is_trending=true", None).await;
    assert_eq!(titles(&body["data"]["results"]), vec!["Moonlight Palace"]);

    let (_, body) = get(&app, "/api/v1/dramas?search=moon", None).await;
    assert_eq!(body["data"]["count"], 2);

    let (_, body) = get(&app, "/api/v1/dramas/moonlight-palace", None).await;
    assert_eq!(body["data"]["search_count"], 1);

    let (status, category) = post(
        &app,
        "/api/admin/categories",
        Some(DEFAULT_API_KEY),
        json!({ "name": "Romance" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category["data"]["slug"], "romance");

    let slug = third["slug"].as_str().unwrap();
    let (status, detail) = put(
        &app,
        &format!("/api/admin/dramas/{slug}/categories"),
        Some(DEFAULT_API_KEY),
        json!({ "ids": [category["data"]["id"]] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["categories"], json!(["Romance"]));

    let (_, body) = get(&app, "/api/v1/dramas?category=Romance", None).await;
    assert_eq!(titles(&body["data"]["results"]), vec!["Quiet River"]);

    let (_, body) = get(&app, "/api/v1/dramas?category=Horror", None).await;
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn test_detail_by_id_or_slug() {
    let app = spawn_app().await;
    let drama = create_drama(&app, json!({ "title": "Twin Keys", "rating": 7.3 })).await;
    let id = drama["id"].as_i64().unwrap();

    let (status, by_id) = get(&app, &format!("/api/v1/dramas/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, by_slug) = get(&app, "/api/v1/dramas/twin-keys", None).await;

    assert_eq!(by_id["data"]["id"], by_slug["data"]["id"]);
    assert_eq!(by_slug["data"]["view_count"], 2);
    assert_eq!(by_slug["data"]["total_episodes"], 0);
    assert_eq!(by_slug["data"]["like_count"], 0);
    assert!(by_slug["data"]["average_review_rating"].is_null());

    let (status, body) = get(&app, "/api/v1/dramas/no-such-drama", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_inactive_episodes_are_hidden() {
    let app = spawn_app().await;
    create_drama(&app, json!({ "title": "Hidden Reel" })).await;
    let episode_id = create_episode(&app, "hidden-reel").await;

    let (status, body) = get(&app, &format!("/api/v1/episodes/{episode_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["duration"], "00:45:00");
    assert_eq!(body["data"]["view_count"], 1);

    let (status, _) = put(
        &app,
        &format!("/api/admin/episodes/{episode_id}"),
        Some(DEFAULT_API_KEY),
        json!({ "episode_number": 1, "title": "Pilot", "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/api/v1/episodes/{episode_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, seasons) = get(&app, "/api/v1/dramas/hidden-reel/seasons", None).await;
    assert_eq!(seasons["data"].as_array().unwrap().len(), 1);
    assert!(seasons["data"][0]["episodes"].as_array().unwrap().is_empty());

    let (_, detail) = get(&app, "/api/v1/dramas/hidden-reel", None).await;
    assert_eq!(detail["data"]["total_episodes"], 1);
}

#[tokio::test]
async fn test_lookups() {
    let app = spawn_app().await;

    post(&app, "/api/admin/tags", Some(DEFAULT_API_KEY), json!({ "name": "Slow Burn" })).await;
    post(
        &app,
        "/api/admin/languages",
        Some(DEFAULT_API_KEY),
        json!({ "name": "Korean", "code": "ko" }),
    )
    .await;
    post(
        &app,
        "/api/admin/content-ratings",
        Some(DEFAULT_API_KEY),
        json!({ "code": "TV-14" }),
    )
    .await;

    let (status, body) = get(&app, "/api/v1/lookups", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tags"][0]["slug"], "slow-burn");
    assert_eq!(body["data"]["languages"][0]["code"], "ko");
    assert_eq!(body["data"]["content_ratings"][0]["code"], "TV-14");
    assert!(body["data"]["categories"].as_array().unwrap().is_empty());

    let (_, body) = get(&app, "/api/v1/tags", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
