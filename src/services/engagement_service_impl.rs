//! `SeaORM` implementation of the `EngagementService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::api::types::{LikeToggleDto, ProgressDto, ReviewDto, SeriesSummaryDto};
use crate::db::{ReviewRow, Store, is_unique_violation};
use crate::domain::{self, SeriesKey};
use crate::entities::reviews;
use crate::models::engagement::{ProgressInput, ReviewInput, ReviewUpdate};
use crate::services::catalog_service::{CatalogError, resolve_series, series_summaries};
use crate::services::engagement_service::{EngagementError, EngagementService};

const DUPLICATE_REVIEW: &str = "You have already reviewed this drama series.";

pub struct SeaOrmEngagementService {
    store: Store,
}

fn review_dto(review: reviews::Model, username: Option<String>) -> ReviewDto {
    ReviewDto {
        id: review.id,
        user_id: review.user_id,
        username,
        series_id: review.series_id,
        rating: review.rating,
        comment: review.comment,
        created_at: review.created_at,
        updated_at: review.updated_at,
    }
}

fn clean_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Without an explicit flag, reaching the end of a known duration marks the episode watched.
fn completed_flag(explicit: Option<bool>, position_secs: i64, duration_secs: Option<i64>) -> bool {
    explicit.unwrap_or_else(|| duration_secs.is_some_and(|d| d > 0 && position_secs >= d))
}

impl From<CatalogError> for EngagementError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { resource, key } => Self::NotFound { resource, key },
            CatalogError::Validation(msg) => Self::Validation(msg),
            CatalogError::Database(msg) => Self::Database(msg),
            CatalogError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl SeaOrmEngagementService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// The review if it belongs to `user_id`; anything else is not found.
    async fn owned_review(&self, user_id: i32, review_id: i32) -> Result<ReviewRow, EngagementError> {
        self.store
            .engagement()
            .get_review(review_id)
            .await?
            .filter(|row| row.review.user_id == user_id)
            .ok_or_else(|| EngagementError::not_found("Review", review_id))
    }

    async fn ensure_series(&self, series_id: i32) -> Result<(), EngagementError> {
        if self.store.series().get(series_id).await?.is_none() {
            return Err(EngagementError::not_found("Drama series", series_id));
        }
        Ok(())
    }
}

#[async_trait]
impl EngagementService for SeaOrmEngagementService {
    async fn list_reviews(&self, series: &SeriesKey) -> Result<Vec<ReviewDto>, EngagementError> {
        let series = resolve_series(&self.store, series).await?;
        let rows = self.store.engagement().reviews_for_series(series.id).await?;
        Ok(rows
            .into_iter()
            .map(|row| review_dto(row.review, row.username))
            .collect())
    }

    async fn create_review(
        &self,
        user_id: i32,
        input: ReviewInput,
    ) -> Result<ReviewDto, EngagementError> {
        let rating = domain::validate_review_rating(input.rating)
            .map_err(|e| EngagementError::Validation(e.to_string()))?;
        self.ensure_series(input.series_id).await?;

        if self
            .store
            .engagement()
            .review_exists(user_id, input.series_id)
            .await?
        {
            return Err(EngagementError::Validation(DUPLICATE_REVIEW.to_string()));
        }

        let review = self
            .store
            .engagement()
            .create_review(user_id, input.series_id, rating, clean_comment(input.comment))
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    EngagementError::Validation(DUPLICATE_REVIEW.to_string())
                } else {
                    EngagementError::from(e)
                }
            })?;

        let row = self
            .store
            .engagement()
            .get_review(review.id)
            .await?
            .ok_or_else(|| EngagementError::not_found("Review", review.id))?;

        info!(user_id, series_id = review.series_id, "Review created");
        Ok(review_dto(row.review, row.username))
    }

    async fn update_review(
        &self,
        user_id: i32,
        review_id: i32,
        input: ReviewUpdate,
    ) -> Result<ReviewDto, EngagementError> {
        let rating = domain::validate_review_rating(input.rating)
            .map_err(|e| EngagementError::Validation(e.to_string()))?;
        let existing = self.owned_review(user_id, review_id).await?;

        let review = self
            .store
            .engagement()
            .update_review(review_id, rating, clean_comment(input.comment))
            .await?
            .ok_or_else(|| EngagementError::not_found("Review", review_id))?;

        Ok(review_dto(review, existing.username))
    }

    async fn delete_review(&self, user_id: i32, review_id: i32) -> Result<(), EngagementError> {
        self.owned_review(user_id, review_id).await?;
        self.store.engagement().delete_review(review_id).await?;
        Ok(())
    }

    async fn toggle_like(
        &self,
        user_id: i32,
        series_id: i32,
    ) -> Result<LikeToggleDto, EngagementError> {
        self.ensure_series(series_id).await?;

        let engagement = self.store.engagement();
        let liked = if engagement.like_exists(user_id, series_id).await? {
            engagement.remove_like(user_id, series_id).await?;
            false
        } else {
            engagement.add_like(user_id, series_id).await?;
            true
        };

        metrics::counter!("engagement_likes_toggled_total", "liked" => liked.to_string())
            .increment(1);

        Ok(LikeToggleDto {
            series_id,
            liked,
            like_count: engagement.like_count(series_id).await?,
        })
    }

    async fn list_likes(&self, user_id: i32) -> Result<Vec<SeriesSummaryDto>, EngagementError> {
        let ids = self.store.engagement().liked_series_ids(user_id).await?;
        let mut models = self.store.series().get_many(&ids).await?;
        models.sort_by_key(|m| ids.iter().position(|id| *id == m.id));

        Ok(series_summaries(&self.store, models, domain::today()).await?)
    }

    async fn record_progress(
        &self,
        user_id: i32,
        input: ProgressInput,
    ) -> Result<ProgressDto, EngagementError> {
        if input.position_secs < 0 {
            return Err(EngagementError::Validation(
                "position_secs cannot be negative".to_string(),
            ));
        }

        let episode = self
            .store
            .seasons()
            .get_episode(input.episode_id)
            .await?
            .filter(|e| e.is_active)
            .ok_or_else(|| EngagementError::not_found("Episode", input.episode_id))?;

        let completed = completed_flag(input.completed, input.position_secs, episode.duration_secs);

        let progress = self
            .store
            .engagement()
            .upsert_progress(user_id, episode.id, input.position_secs, completed)
            .await?;

        Ok(ProgressDto::from(progress))
    }

    async fn list_progress(&self, user_id: i32) -> Result<Vec<ProgressDto>, EngagementError> {
        let rows = self
            .store
            .engagement()
            .progress_for_user(user_id, false, None)
            .await?;
        Ok(rows.into_iter().map(ProgressDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_flag_defaults_to_duration() {
        assert!(completed_flag(None, 600, Some(600)));
        assert!(completed_flag(None, 700, Some(600)));
        assert!(!completed_flag(None, 599, Some(600)));
        assert!(!completed_flag(None, 600, None));
        assert!(!completed_flag(None, 0, Some(0)));
    }

    #[test]
    fn test_completed_flag_explicit_wins() {
        assert!(completed_flag(Some(true), 10, Some(600)));
        assert!(!completed_flag(Some(false), 600, Some(600)));
    }

    #[test]
    fn test_clean_comment() {
        assert_eq!(clean_comment(Some("  great  ".to_string())), Some("great".to_string()));
        assert_eq!(clean_comment(Some("   ".to_string())), None);
        assert_eq!(clean_comment(None), None);
    }
}
