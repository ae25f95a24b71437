//! Reviews, likes and watch progress of the signed-in user.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::{CurrentUser, MessageResponse};
use super::validation::validate_id;
use super::{
    ApiError, ApiResponse, AppState, LikeToggleDto, ProgressDto, ReviewDto, SeriesSummaryDto,
};
use crate::domain::SeriesKey;
use crate::models::engagement::{LikeInput, ProgressInput, ReviewInput, ReviewUpdate};
use crate::services::EngagementError;

impl From<EngagementError> for ApiError {
    fn from(err: EngagementError) -> Self {
        match err {
            EngagementError::NotFound { resource, key } => Self::not_found(resource, key),
            EngagementError::Validation(msg) => Self::validation(msg),
            EngagementError::Database(msg) => Self::DatabaseError(msg),
            EngagementError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /v1/dramas/{key}/reviews
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReviewDto>>>, ApiError> {
    let reviews = state
        .engagement_service()
        .list_reviews(&SeriesKey::parse(&key))
        .await?;
    Ok(Json(ApiResponse::success(reviews)))
}

/// POST /v1/reviews
/// One review per user and series; a second one is rejected with 400.
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<ReviewInput>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    validate_id(payload.series_id, "drama series")?;
    let review = state
        .engagement_service()
        .create_review(user.id, payload)
        .await?;
    Ok(Json(ApiResponse::success(review)))
}

/// PUT /v1/reviews/{id}
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewUpdate>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = validate_id(id, "review")?;
    let review = state
        .engagement_service()
        .update_review(user.id, id, payload)
        .await?;
    Ok(Json(ApiResponse::success(review)))
}

/// DELETE /v1/reviews/{id}
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id, "review")?;
    state.engagement_service().delete_review(user.id, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Review deleted",
    ))))
}

/// GET /v1/likes
pub async fn list_likes(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<SeriesSummaryDto>>>, ApiError> {
    let liked = state.engagement_service().list_likes(user.id).await?;
    Ok(Json(ApiResponse::success(liked)))
}

/// POST /v1/likes
/// Toggles: likes the series, or unlikes it when already liked.
pub async fn toggle_like(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<LikeInput>,
) -> Result<Json<ApiResponse<LikeToggleDto>>, ApiError> {
    let series_id = validate_id(payload.series_id, "drama series")?;
    let toggled = state
        .engagement_service()
        .toggle_like(user.id, series_id)
        .await?;
    Ok(Json(ApiResponse::success(toggled)))
}

/// GET /v1/progress
pub async fn list_progress(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<ProgressDto>>>, ApiError> {
    let progress = state.engagement_service().list_progress(user.id).await?;
    Ok(Json(ApiResponse::success(progress)))
}

/// POST /v1/progress
pub async fn record_progress(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<ProgressInput>,
) -> Result<Json<ApiResponse<ProgressDto>>, ApiError> {
    validate_id(payload.episode_id, "episode")?;
    let progress = state
        .engagement_service()
        .record_progress(user.id, payload)
        .await?;
    Ok(Json(ApiResponse::success(progress)))
}
