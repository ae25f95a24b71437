//! Back-office routes. Every route here requires a staff account.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use super::AppState;
use super::auth::require_staff;

mod catalog;
mod lookups;
mod users;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(catalog::dashboard))
        .route(
            "/dramas",
            get(catalog::list_dramas).post(catalog::create_drama),
        )
        .route(
            "/dramas/{slug}",
            get(catalog::get_drama)
                .put(catalog::update_drama)
                .delete(catalog::delete_drama),
        )
        .route("/dramas/{slug}/tags", put(catalog::link_tags))
        .route("/dramas/{slug}/languages", put(catalog::link_languages))
        .route("/dramas/{slug}/categories", put(catalog::link_categories))
        .route("/dramas/{slug}/cast", put(catalog::link_cast))
        .route("/dramas/{slug}/seasons", post(catalog::create_season))
        .route(
            "/seasons/{id}",
            get(catalog::get_season)
                .put(catalog::update_season)
                .delete(catalog::delete_season),
        )
        .route(
            "/seasons/{id}/episodes",
            get(catalog::season_episodes).post(catalog::create_episode),
        )
        .route(
            "/episodes/{id}",
            put(catalog::update_episode).delete(catalog::delete_episode),
        )
        .route("/episodes/{id}/media", put(catalog::update_media))
        .route(
            "/categories",
            get(lookups::list_categories).post(lookups::create_category),
        )
        .route(
            "/categories/{id}",
            get(lookups::get_category)
                .put(lookups::update_category)
                .delete(lookups::delete_category),
        )
        .route("/tags", get(lookups::list_tags).post(lookups::create_tag))
        .route(
            "/tags/{id}",
            get(lookups::get_tag)
                .put(lookups::update_tag)
                .delete(lookups::delete_tag),
        )
        .route(
            "/languages",
            get(lookups::list_languages).post(lookups::create_language),
        )
        .route(
            "/languages/{id}",
            get(lookups::get_language)
                .put(lookups::update_language)
                .delete(lookups::delete_language),
        )
        .route(
            "/content-ratings",
            get(lookups::list_content_ratings).post(lookups::create_content_rating),
        )
        .route(
            "/content-ratings/{id}",
            get(lookups::get_content_rating)
                .put(lookups::update_content_rating)
                .delete(lookups::delete_content_rating),
        )
        .route(
            "/actors",
            get(lookups::list_actors).post(lookups::create_actor),
        )
        .route(
            "/actors/{id}",
            get(lookups::get_actor)
                .put(lookups::update_actor)
                .delete(lookups::delete_actor),
        )
        .route(
            "/directors",
            get(lookups::list_directors).post(lookups::create_director),
        )
        .route(
            "/directors/{id}",
            get(lookups::get_director)
                .put(lookups::update_director)
                .delete(lookups::delete_director),
        )
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user),
        )
        .route("/users/{id}/password", put(users::reset_password))
        .route("/users/{id}/wallet", get(users::get_wallet))
        .route("/users/{id}/wallet/credit", post(users::credit_wallet))
        .route("/users/{id}/wallet/debit", post(users::debit_wallet))
        .route_layer(middleware::from_fn(require_staff))
}
