//! Reviews, likes and watch progress of signed-in users.

use std::fmt;
use thiserror::Error;

use crate::api::types::{LikeToggleDto, ProgressDto, ReviewDto, SeriesSummaryDto};
use crate::domain::SeriesKey;
use crate::models::engagement::{ProgressInput, ReviewInput, ReviewUpdate};

#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("{resource} {key} not found")]
    NotFound { resource: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngagementError {
    pub fn not_found(resource: &'static str, key: impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for EngagementError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for EngagementError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait EngagementService: Send + Sync {
    /// Newest first.
    async fn list_reviews(&self, series: &SeriesKey) -> Result<Vec<ReviewDto>, EngagementError>;

    /// # Errors
    ///
    /// Returns [`EngagementError::Validation`] when the user already reviewed the series.
    async fn create_review(
        &self,
        user_id: i32,
        input: ReviewInput,
    ) -> Result<ReviewDto, EngagementError>;

    /// Reviews of other users are reported as not found.
    async fn update_review(
        &self,
        user_id: i32,
        review_id: i32,
        input: ReviewUpdate,
    ) -> Result<ReviewDto, EngagementError>;

    async fn delete_review(&self, user_id: i32, review_id: i32) -> Result<(), EngagementError>;

    /// Likes the series, or removes the like when it exists.
    async fn toggle_like(
        &self,
        user_id: i32,
        series_id: i32,
    ) -> Result<LikeToggleDto, EngagementError>;

    async fn list_likes(&self, user_id: i32) -> Result<Vec<SeriesSummaryDto>, EngagementError>;

    /// One row per user and episode; later calls overwrite it.
    async fn record_progress(
        &self,
        user_id: i32,
        input: ProgressInput,
    ) -> Result<ProgressDto, EngagementError>;

    /// Most recently updated first.
    async fn list_progress(&self, user_id: i32) -> Result<Vec<ProgressDto>, EngagementError>;
}
