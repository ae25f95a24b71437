use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::timestamp;
use crate::entities::{episode_watch_progress, likes, prelude::*, reviews};

/// A review joined with the reviewer's username.
#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub review: reviews::Model,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReviewStats {
    pub count: u64,
    pub average: Option<f64>,
}

/// Reviews, likes and watch progress.
pub struct EngagementRepository {
    conn: DatabaseConnection,
}

impl EngagementRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // Reviews

    pub async fn reviews_for_series(&self, series_id: i32) -> Result<Vec<ReviewRow>> {
        let rows = Reviews::find()
            .filter(reviews::Column::SeriesId.eq(series_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .find_also_related(Users)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(review, user)| ReviewRow {
                review,
                username: user.map(|u| u.username),
            })
            .collect())
    }

    pub async fn get_review(&self, id: i32) -> Result<Option<ReviewRow>> {
        let row = Reviews::find_by_id(id)
            .find_also_related(Users)
            .one(&self.conn)
            .await?;

        Ok(row.map(|(review, user)| ReviewRow {
            review,
            username: user.map(|u| u.username),
        }))
    }

    pub async fn review_exists(&self, user_id: i32, series_id: i32) -> Result<bool> {
        let count = Reviews::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .filter(reviews::Column::SeriesId.eq(series_id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn create_review(
        &self,
        user_id: i32,
        series_id: i32,
        rating: f64,
        comment: Option<String>,
    ) -> Result<reviews::Model> {
        let now = timestamp();
        let model = reviews::ActiveModel {
            user_id: Set(user_id),
            series_id: Set(series_id),
            rating: Set(rating),
            comment: Set(comment),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update_review(
        &self,
        id: i32,
        rating: f64,
        comment: Option<String>,
    ) -> Result<Option<reviews::Model>> {
        let Some(existing) = Reviews::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: reviews::ActiveModel = existing.into();
        active.rating = Set(rating);
        active.comment = Set(comment);
        active.updated_at = Set(timestamp());

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete_review(&self, id: i32) -> Result<bool> {
        let result = Reviews::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn review_stats(&self, series_id: i32) -> Result<ReviewStats> {
        let ratings: Vec<f64> = Reviews::find()
            .select_only()
            .column(reviews::Column::Rating)
            .filter(reviews::Column::SeriesId.eq(series_id))
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to load review ratings")?;

        if ratings.is_empty() {
            return Ok(ReviewStats::default());
        }

        #[allow(clippy::cast_precision_loss)]
        let average = ratings.iter().sum::<f64>() / ratings.len() as f64;

        Ok(ReviewStats {
            count: ratings.len() as u64,
            average: Some((average * 10.0).round() / 10.0),
        })
    }

    pub async fn count_reviews(&self) -> Result<u64> {
        Ok(Reviews::find().count(&self.conn).await?)
    }

    // Likes

    pub async fn like_exists(&self, user_id: i32, series_id: i32) -> Result<bool> {
        Ok(Likes::find_by_id((user_id, series_id))
            .one(&self.conn)
            .await?
            .is_some())
    }

    /// No-op when the like already exists.
    pub async fn add_like(&self, user_id: i32, series_id: i32) -> Result<()> {
        let active = likes::ActiveModel {
            user_id: Set(user_id),
            series_id: Set(series_id),
            liked_on: Set(timestamp()),
        };

        Likes::insert(active)
            .on_conflict(
                OnConflict::columns([likes::Column::UserId, likes::Column::SeriesId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn remove_like(&self, user_id: i32, series_id: i32) -> Result<bool> {
        let result = Likes::delete_by_id((user_id, series_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn like_count(&self, series_id: i32) -> Result<u64> {
        Ok(Likes::find()
            .filter(likes::Column::SeriesId.eq(series_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn count_likes(&self) -> Result<u64> {
        Ok(Likes::find().count(&self.conn).await?)
    }

    /// Liked series ids, most recent first.
    pub async fn liked_series_ids(&self, user_id: i32) -> Result<Vec<i32>> {
        Ok(Likes::find()
            .filter(likes::Column::UserId.eq(user_id))
            .order_by_desc(likes::Column::LikedOn)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|like| like.series_id)
            .collect())
    }

    // Watch progress

    /// Inserts or overwrites the single progress row of `(user_id, episode_id)`.
    pub async fn upsert_progress(
        &self,
        user_id: i32,
        episode_id: i32,
        position_secs: i64,
        completed: bool,
    ) -> Result<episode_watch_progress::Model> {
        let active = episode_watch_progress::ActiveModel {
            user_id: Set(user_id),
            episode_id: Set(episode_id),
            position_secs: Set(position_secs),
            completed: Set(completed),
            updated_at: Set(timestamp()),
        };

        EpisodeWatchProgress::insert(active)
            .on_conflict(
                OnConflict::columns([
                    episode_watch_progress::Column::UserId,
                    episode_watch_progress::Column::EpisodeId,
                ])
                .update_columns([
                    episode_watch_progress::Column::PositionSecs,
                    episode_watch_progress::Column::Completed,
                    episode_watch_progress::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        EpisodeWatchProgress::find_by_id((user_id, episode_id))
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Progress row missing after upsert"))
    }

    pub async fn progress_for_user(
        &self,
        user_id: i32,
        incomplete_only: bool,
        limit: Option<u64>,
    ) -> Result<Vec<episode_watch_progress::Model>> {
        let mut query = EpisodeWatchProgress::find()
            .filter(episode_watch_progress::Column::UserId.eq(user_id))
            .order_by_desc(episode_watch_progress::Column::UpdatedAt)
            .order_by_desc(episode_watch_progress::Column::EpisodeId);
        if incomplete_only {
            query = query.filter(episode_watch_progress::Column::Completed.eq(false));
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&self.conn).await?)
    }
}
