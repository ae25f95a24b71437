//! Public catalog endpoints.
//!
//! Thin HTTP mapping over [`CatalogService`](crate::services::CatalogService):
//! the home aggregation, the filtered drama listing, series and episode detail.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::auth::MaybeUser;
use super::validation::validate_id;
use super::{
    ApiError, ApiResponse, AppState, EpisodeDto, HomeDto, PageQuery, Paginated, SeasonDto,
    SeriesDetailDto, SeriesSummaryDto,
};
use crate::domain::SeriesKey;
use crate::models::catalog::SeriesFilter;
use crate::services::CatalogError;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { resource, key } => Self::not_found(resource, key),
            CatalogError::Validation(msg) => Self::validation(msg),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `GET /api/v1/home`
///
/// Anonymous callers get empty `continue_watching` and a top-rated
/// `you_might_like`.
pub async fn home(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> Result<Json<ApiResponse<HomeDto>>, ApiError> {
    let home = state
        .catalog_service()
        .home(user.map(|u| u.id))
        .await?;
    Ok(Json(ApiResponse::success(home)))
}

/// `GET /api/v1/dramas`
///
/// # Query Parameters
/// - `search`, `category`, `tag`: text filters
/// - `is_popular`, `is_trending`, `is_featured`, `new_release`, `top_searched`: flag filters
/// - `page`, `page_size`
pub async fn list_dramas(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<SeriesFilter>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Paginated<SeriesSummaryDto>>>, ApiError> {
    let dramas = state.catalog_service().list_series(filter, page).await?;
    Ok(Json(ApiResponse::success(dramas)))
}

/// `GET /api/v1/dramas/{key}` where `key` is an id or a slug.
pub async fn get_drama(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<SeriesDetailDto>>, ApiError> {
    let detail = state
        .catalog_service()
        .series_detail(&SeriesKey::parse(&key))
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// `GET /api/v1/dramas/{key}/seasons`
pub async fn drama_seasons(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Vec<SeasonDto>>>, ApiError> {
    let seasons = state
        .catalog_service()
        .series_seasons(&SeriesKey::parse(&key))
        .await?;
    Ok(Json(ApiResponse::success(seasons)))
}

/// `GET /api/v1/episodes/{id}`
pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = validate_id(id, "episode")?;
    let episode = state.catalog_service().episode_detail(id).await?;
    Ok(Json(ApiResponse::success(episode)))
}
