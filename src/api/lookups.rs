use axum::{Json, extract::State};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, CategoryDto, ContentRatingDto, LanguageDto, LookupsDto,
    TagDto,
};

/// GET /v1/lookups
/// All reference tables in one response, for building filter menus.
pub async fn all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<LookupsDto>>, ApiError> {
    let lookups = state.catalog_service().lookups().await?;
    Ok(Json(ApiResponse::success(lookups)))
}

/// GET /v1/categories
pub async fn categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let categories = state.catalog_service().categories().await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// GET /v1/tags
pub async fn tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TagDto>>>, ApiError> {
    let tags = state.catalog_service().tags().await?;
    Ok(Json(ApiResponse::success(tags)))
}

/// GET /v1/languages
pub async fn languages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LanguageDto>>>, ApiError> {
    let languages = state.catalog_service().languages().await?;
    Ok(Json(ApiResponse::success(languages)))
}

/// GET /v1/content-ratings
pub async fn content_ratings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ContentRatingDto>>>, ApiError> {
    let ratings = state.catalog_service().content_ratings().await?;
    Ok(Json(ApiResponse::success(ratings)))
}
