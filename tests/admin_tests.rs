mod common;

use axum::http::StatusCode;
use common::{DEFAULT_API_KEY, create_drama, create_episode, get, post, put, register_user, send, spawn_app};
use serde_json::json;

const ADMIN: Option<&str> = Some(DEFAULT_API_KEY);

#[tokio::test]
async fn test_drama_crud_and_slugs() {
    let app = spawn_app().await;

    let first = create_drama(&app, json!({ "title": "Double Take", "rating": 8.8 })).await;
    let second = create_drama(&app, json!({ "title": "Double Take" })).await;
    assert_eq!(first["slug"], "double-take");
    assert_eq!(second["slug"], "double-take-2");

    let (status, body) = post(&app, "/api/admin/dramas", ADMIN, json!({ "title": "Too Good", "rating": 10.0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = post(&app, "/api/admin/dramas", ADMIN, json!({ "title": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/admin/dramas",
        ADMIN,
        json!({ "title": "Ghost Director", "director_id": 99 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = put(
        &app,
        "/api/admin/dramas/double-take-2",
        ADMIN,
        json!({ "title": "Double Take Returns", "rating": 6.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["slug"], "double-take-2");
    assert_eq!(updated["data"]["title"], "Double Take Returns");

    let (status, _) = put(
        &app,
        "/api/admin/dramas/double-take-2",
        ADMIN,
        json!({ "title": "Double Take Returns", "slug": "double-take" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, list) = get(&app, "/api/admin/dramas?title=returns", ADMIN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"]["count"], 1);

    create_episode(&app, "double-take").await;
    let (status, _) = send(&app, "DELETE", "/api/admin/dramas/double-take", ADMIN, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/v1/dramas/double-take", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, dashboard) = get(&app, "/api/admin/dashboard", ADMIN).await;
    assert_eq!(dashboard["data"]["series"], 1);
    assert_eq!(dashboard["data"]["seasons"], 0);
    assert_eq!(dashboard["data"]["episodes"], 0);
}

#[tokio::test]
async fn test_seasons_and_episodes() {
    let app = spawn_app().await;
    create_drama(&app, json!({ "title": "Long Haul" })).await;

    let (status, season) = post(
        &app,
        "/api/admin/dramas/long-haul/seasons",
        ADMIN,
        json!({ "season_number": 1, "description": "Opening arc" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let season_id = season["data"]["id"].as_i64().unwrap();

    let (status, body) = post(
        &app,
        "/api/admin/dramas/long-haul/seasons",
        ADMIN,
        json!({ "season_number": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "A season with this number already exists for this drama series."
    );

    let (status, _) = post(
        &app,
        "/api/admin/dramas/long-haul/seasons",
        ADMIN,
        json!({ "season_number": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let episode = json!({ "episode_number": 1, "title": "Departure", "duration": "01:02:03" });
    let (status, created) = post(&app, &format!("/api/admin/seasons/{season_id}/episodes"), ADMIN, episode.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["duration"], "01:02:03");
    let episode_id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = post(&app, &format!("/api/admin/seasons/{season_id}/episodes"), ADMIN, episode).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "An episode with this number already exists for this season.");

    let (status, _) = post(
        &app,
        &format!("/api/admin/seasons/{season_id}/episodes"),
        ADMIN,
        json!({ "episode_number": 2, "title": "Bad Clock", "duration": "1:99" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, media) = put(
        &app,
        &format!("/api/admin/episodes/{episode_id}/media"),
        ADMIN,
        json!({ "video_file": "https://cdn.example.com/departure.mp4", "video_file_name": "departure.mp4" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(media["data"]["video_file_name"], "departure.mp4");

    let (_, episodes) = get(&app, &format!("/api/admin/seasons/{season_id}/episodes"), ADMIN).await;
    assert_eq!(episodes["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/admin/seasons/{season_id}"), ADMIN, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/api/v1/episodes/{episode_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_links_reject_unknown_ids() {
    let app = spawn_app().await;
    create_drama(&app, json!({ "title": "Ensemble" })).await;

    let (_, actor) = post(&app, "/api/admin/actors", ADMIN, json!({ "name": "Kim Yuna" })).await;
    let actor_id = actor["data"]["id"].as_i64().unwrap();

    let (status, body) = put(
        &app,
        "/api/admin/dramas/ensemble/cast",
        ADMIN,
        json!({ "ids": [actor_id, 404] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("actor"));

    let (status, detail) = put(
        &app,
        "/api/admin/dramas/ensemble/cast",
        ADMIN,
        json!({ "ids": [actor_id, actor_id] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["cast"][0]["name"], "Kim Yuna");

    let (_, detail) = put(&app, "/api/admin/dramas/ensemble/cast", ADMIN, json!({ "ids": [] })).await;
    assert!(detail["data"]["cast"].as_array().unwrap().is_empty());

    let (status, _) = put(&app, "/api/admin/dramas/nobody/tags", ADMIN, json!({ "ids": [] })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lookup_crud() {
    let app = spawn_app().await;

    let (status, created) = post(&app, "/api/admin/tags", ADMIN, json!({ "name": "Enemies to Lovers" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["slug"], "enemies-to-lovers");
    let tag_id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = post(&app, "/api/admin/tags", ADMIN, json!({ "name": "Enemies to Lovers" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Tag with this name already exists");

    let (status, _) = post(&app, "/api/admin/tags", ADMIN, json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, renamed) = put(
        &app,
        &format!("/api/admin/tags/{tag_id}"),
        ADMIN,
        json!({ "name": "Rivals", "slug": "rivals" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["data"]["name"], "Rivals");

    let (_, list) = get(&app, "/api/admin/tags?name=riv", ADMIN).await;
    assert_eq!(list["data"]["count"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/admin/tags/{tag_id}"), ADMIN, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, &format!("/api/admin/tags/{tag_id}"), ADMIN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, director) = post(
        &app,
        "/api/admin/directors",
        ADMIN,
        json!({ "name": "Park Chan", "date_of_birth": "1963-08-23" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let director_id = director["data"]["id"].clone();

    let drama = create_drama(&app, json!({ "title": "Directed", "director_id": director_id })).await;
    assert_eq!(drama["director_id"], director_id);

    let (_, detail) = get(&app, "/api/v1/dramas/directed", None).await;
    assert_eq!(detail["data"]["director"]["name"], "Park Chan");
}

#[tokio::test]
async fn test_user_administration_and_wallets() {
    let app = spawn_app().await;
    let (user_id, key) = register_user(&app, "viewer").await;

    let (status, users) = get(&app, "/api/admin/users?search=view", ADMIN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users["data"]["count"], 1);
    assert_eq!(users["data"]["results"][0]["username"], "viewer");

    let (_, wallet) = get(&app, "/api/v1/wallet", Some(&key)).await;
    assert_eq!(wallet["data"]["available_coins"], 0);

    let wallet_uri = format!("/api/admin/users/{user_id}/wallet");
    let (status, wallet) = post(&app, &format!("{wallet_uri}/credit"), ADMIN, json!({ "coins": 50 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wallet["data"]["total_coins"], 50);

    let (_, wallet) = post(&app, &format!("{wallet_uri}/debit"), ADMIN, json!({ "coins": 20 })).await;
    assert_eq!(wallet["data"]["used_coins"], 20);
    assert_eq!(wallet["data"]["available_coins"], 30);

    let (status, body) = post(&app, &format!("{wallet_uri}/debit"), ADMIN, json!({ "coins": 31 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Insufficient coins: 30 available, 31 requested");

    let (status, _) = post(&app, &format!("{wallet_uri}/credit"), ADMIN, json!({ "coins": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, wallet) = get(&app, "/api/v1/wallet", Some(&key)).await;
    assert_eq!(wallet["data"]["available_coins"], 30);

    // Credits that would overflow the balance are refused and leave it readable
    let (status, _) = post(&app, &format!("{wallet_uri}/credit"), ADMIN, json!({ "coins": i64::MAX - 50 })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post(&app, &format!("{wallet_uri}/credit"), ADMIN, json!({ "coins": 10 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("wallet limit"));
    let (status, wallet) = get(&app, "/api/v1/wallet", Some(&key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wallet["data"]["total_coins"], i64::MAX);
    assert_eq!(wallet["data"]["available_coins"], i64::MAX - 20);

    let (status, _) = get(&app, "/api/admin/users/9999/wallet", ADMIN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Promotion grants staff access
    let (status, _) = get(&app, "/api/admin/dashboard", Some(&key)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, promoted) = put(
        &app,
        &format!("/api/admin/users/{user_id}"),
        ADMIN,
        json!({ "user_type": "admin", "first_name": " Vee " }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(promoted["data"]["user_type"], "admin");
    assert_eq!(promoted["data"]["first_name"], "Vee");

    let (status, _) = get(&app, "/api/admin/dashboard", Some(&key)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = put(
        &app,
        &format!("/api/admin/users/{user_id}/password"),
        ADMIN,
        json!({ "new_password": "another-horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({ "login": "viewer", "password": "another-horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
