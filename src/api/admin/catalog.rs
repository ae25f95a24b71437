//! Back-office management of dramas, their link sets, seasons and episodes.
//! Dramas are addressed by slug; seasons and episodes by id.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::auth::MessageResponse;
use crate::api::validation::{filter_term, validate_id, validate_link_ids, validate_slug};
use crate::api::{
    ApiError, ApiResponse, AppState, DashboardDto, EpisodeDto, PageQuery, Paginated, SeasonDto,
    SeriesDetailDto, SeriesSummaryDto,
};
use crate::models::catalog::{EpisodeInput, LinkKind, MediaUpdate, SeasonInput, SeriesInput};

#[derive(Debug, Deserialize)]
pub struct SeriesListQuery {
    pub title: Option<String>,
}

/// Full replacement set for one link kind.
#[derive(Debug, Deserialize)]
pub struct LinkIds {
    pub ids: Vec<i32>,
}

/// GET /admin/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let counts = state.content_service().dashboard().await?;
    Ok(Json(ApiResponse::success(counts)))
}

/// GET /admin/dramas
pub async fn list_dramas(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeriesListQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Paginated<SeriesSummaryDto>>>, ApiError> {
    let dramas = state
        .content_service()
        .list_series(filter_term(query.title), page)
        .await?;
    Ok(Json(ApiResponse::success(dramas)))
}

/// POST /admin/dramas
pub async fn create_drama(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SeriesInput>,
) -> Result<Json<ApiResponse<SeriesSummaryDto>>, ApiError> {
    let drama = state.content_service().create_series(payload).await?;
    Ok(Json(ApiResponse::success(drama)))
}

/// GET /admin/dramas/{slug}
pub async fn get_drama(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    let slug = validate_slug(&slug)?;
    let drama = state.content_service().get_series(slug).await?;
    Ok(Json(ApiResponse::success(drama)))
}

/// PUT /admin/dramas/{slug}
pub async fn update_drama(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<SeriesInput>,
) -> Result<Json<ApiResponse<SeriesSummaryDto>>, ApiError> {
    let slug = validate_slug(&slug)?;
    let drama = state.content_service().update_series(slug, payload).await?;
    Ok(Json(ApiResponse::success(drama)))
}

/// DELETE /admin/dramas/{slug}
/// Cascades to seasons, episodes, links, reviews and likes.
pub async fn delete_drama(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let slug = validate_slug(&slug)?;
    state.content_service().delete_series(slug).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Drama series deleted",
    ))))
}

async fn replace_links(
    state: &AppState,
    slug: &str,
    kind: LinkKind,
    ids: Vec<i32>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    let slug = validate_slug(slug)?;
    validate_link_ids(&ids)?;
    let drama = state.content_service().replace_links(slug, kind, ids).await?;
    Ok(Json(ApiResponse::success(drama)))
}

/// PUT /admin/dramas/{slug}/tags
pub async fn link_tags(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<LinkIds>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    replace_links(&state, &slug, LinkKind::Tags, payload.ids).await
}

/// PUT /admin/dramas/{slug}/languages
pub async fn link_languages(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<LinkIds>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    replace_links(&state, &slug, LinkKind::Languages, payload.ids).await
}

/// PUT /admin/dramas/{slug}/categories
pub async fn link_categories(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<LinkIds>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    replace_links(&state, &slug, LinkKind::Categories, payload.ids).await
}

/// PUT /admin/dramas/{slug}/cast
pub async fn link_cast(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<LinkIds>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    replace_links(&state, &slug, LinkKind::Cast, payload.ids).await
}

/// POST /admin/dramas/{slug}/seasons
pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<SeasonInput>,
) -> Result<Json<ApiResponse<SeasonDto>>, ApiError> {
    let slug = validate_slug(&slug)?;
    let season = state.content_service().create_season(slug, payload).await?;
    Ok(Json(ApiResponse::success(season)))
}

/// GET /admin/seasons/{id}
pub async fn get_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SeasonDto>>, ApiError> {
    let id = validate_id(id, "season")?;
    let season = state.content_service().get_season(id).await?;
    Ok(Json(ApiResponse::success(season)))
}

/// PUT /admin/seasons/{id}
pub async fn update_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<SeasonInput>,
) -> Result<Json<ApiResponse<SeasonDto>>, ApiError> {
    let id = validate_id(id, "season")?;
    let season = state.content_service().update_season(id, payload).await?;
    Ok(Json(ApiResponse::success(season)))
}

/// DELETE /admin/seasons/{id}
pub async fn delete_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id, "season")?;
    state.content_service().delete_season(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Season deleted",
    ))))
}

/// GET /admin/seasons/{id}/episodes
/// Every episode of the season, inactive ones included.
pub async fn season_episodes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<EpisodeDto>>>, ApiError> {
    let id = validate_id(id, "season")?;
    let episodes = state.content_service().season_episodes(id).await?;
    Ok(Json(ApiResponse::success(episodes)))
}

/// POST /admin/seasons/{id}/episodes
pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<EpisodeInput>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = validate_id(id, "season")?;
    let episode = state.content_service().create_episode(id, payload).await?;
    Ok(Json(ApiResponse::success(episode)))
}

/// PUT /admin/episodes/{id}
pub async fn update_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<EpisodeInput>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = validate_id(id, "episode")?;
    let episode = state.content_service().update_episode(id, payload).await?;
    Ok(Json(ApiResponse::success(episode)))
}

/// DELETE /admin/episodes/{id}
pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id, "episode")?;
    state.content_service().delete_episode(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Episode deleted",
    ))))
}

/// PUT /admin/episodes/{id}/media
/// Records the delivery URL of an already uploaded video.
pub async fn update_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<MediaUpdate>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = validate_id(id, "episode")?;
    let episode = state.content_service().update_media(id, payload).await?;
    Ok(Json(ApiResponse::success(episode)))
}
