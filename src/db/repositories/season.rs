use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::timestamp;
use crate::entities::{episodes, prelude::*, seasons};
use crate::models::catalog::SeasonInput;

/// Resolved column values of an episode, with the duration already in seconds.
#[derive(Debug, Clone)]
pub struct EpisodeFields {
    pub episode_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration_secs: Option<i64>,
    pub video_file: Option<String>,
    pub video_file_name: Option<String>,
    pub is_free: bool,
    pub is_active: bool,
}

/// Seasons and the episodes under them.
pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // Seasons

    pub async fn for_series(&self, series_id: i32) -> Result<Vec<seasons::Model>> {
        Ok(Seasons::find()
            .filter(seasons::Column::SeriesId.eq(series_id))
            .order_by_asc(seasons::Column::SeasonNumber)
            .all(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<seasons::Model>> {
        Ok(Seasons::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_many(&self, ids: &[i32]) -> Result<Vec<seasons::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Seasons::find()
            .filter(seasons::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await?)
    }

    pub async fn number_taken(
        &self,
        series_id: i32,
        season_number: i32,
        exclude_id: Option<i32>,
    ) -> Result<bool> {
        let mut query = Seasons::find()
            .filter(seasons::Column::SeriesId.eq(series_id))
            .filter(seasons::Column::SeasonNumber.eq(season_number));
        if let Some(id) = exclude_id {
            query = query.filter(seasons::Column::Id.ne(id));
        }
        Ok(query.count(&self.conn).await? > 0)
    }

    pub async fn create(&self, series_id: i32, input: SeasonInput) -> Result<seasons::Model> {
        let model = seasons::ActiveModel {
            series_id: Set(series_id),
            season_number: Set(input.season_number),
            release_date: Set(input.release_date),
            description: Set(input.description),
            created_at: Set(timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: SeasonInput) -> Result<Option<seasons::Model>> {
        let Some(existing) = Seasons::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: seasons::ActiveModel = existing.into();
        active.season_number = Set(input.season_number);
        active.release_date = Set(input.release_date);
        active.description = Set(input.description);

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Seasons::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Seasons::find().count(&self.conn).await?)
    }

    // Episodes

    /// Episodes of the given seasons ordered by season then episode number.
    pub async fn episodes_for_seasons(
        &self,
        season_ids: &[i32],
        active_only: bool,
    ) -> Result<Vec<episodes::Model>> {
        if season_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = Episodes::find()
            .filter(episodes::Column::SeasonId.is_in(season_ids.iter().copied()))
            .order_by_asc(episodes::Column::SeasonId)
            .order_by_asc(episodes::Column::EpisodeNumber);
        if active_only {
            query = query.filter(episodes::Column::IsActive.eq(true));
        }
        Ok(query.all(&self.conn).await?)
    }

    /// Back-office view: every episode of a season, inactive ones included, by id.
    pub async fn episodes_of_season(&self, season_id: i32) -> Result<Vec<episodes::Model>> {
        Ok(Episodes::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .order_by_asc(episodes::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn get_episode(&self, id: i32) -> Result<Option<episodes::Model>> {
        Ok(Episodes::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_episodes(&self, ids: &[i32]) -> Result<Vec<episodes::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Episodes::find()
            .filter(episodes::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await?)
    }

    pub async fn episode_number_taken(
        &self,
        season_id: i32,
        episode_number: i32,
        exclude_id: Option<i32>,
    ) -> Result<bool> {
        let mut query = Episodes::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .filter(episodes::Column::EpisodeNumber.eq(episode_number));
        if let Some(id) = exclude_id {
            query = query.filter(episodes::Column::Id.ne(id));
        }
        Ok(query.count(&self.conn).await? > 0)
    }

    pub async fn create_episode(
        &self,
        season_id: i32,
        fields: EpisodeFields,
    ) -> Result<episodes::Model> {
        let now = timestamp();
        let model = episodes::ActiveModel {
            season_id: Set(season_id),
            episode_number: Set(fields.episode_number),
            title: Set(fields.title),
            description: Set(fields.description),
            release_date: Set(fields.release_date),
            duration_secs: Set(fields.duration_secs),
            video_file: Set(fields.video_file),
            video_file_name: Set(fields.video_file_name),
            is_free: Set(fields.is_free),
            view_count: Set(0),
            is_active: Set(fields.is_active),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update_episode(
        &self,
        id: i32,
        fields: EpisodeFields,
    ) -> Result<Option<episodes::Model>> {
        let Some(existing) = Episodes::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: episodes::ActiveModel = existing.into();
        active.episode_number = Set(fields.episode_number);
        active.title = Set(fields.title);
        active.description = Set(fields.description);
        active.release_date = Set(fields.release_date);
        active.duration_secs = Set(fields.duration_secs);
        active.video_file = Set(fields.video_file);
        active.video_file_name = Set(fields.video_file_name);
        active.is_free = Set(fields.is_free);
        active.is_active = Set(fields.is_active);
        active.updated_at = Set(timestamp());

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn update_media(
        &self,
        id: i32,
        video_file: String,
        video_file_name: Option<String>,
    ) -> Result<Option<episodes::Model>> {
        let Some(existing) = Episodes::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: episodes::ActiveModel = existing.into();
        active.video_file = Set(Some(video_file));
        if video_file_name.is_some() {
            active.video_file_name = Set(video_file_name);
        }
        active.updated_at = Set(timestamp());

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete_episode(&self, id: i32) -> Result<bool> {
        let result = Episodes::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn increment_episode_views(&self, id: i32) -> Result<()> {
        Episodes::update_many()
            .col_expr(
                episodes::Column::ViewCount,
                Expr::col(episodes::Column::ViewCount).add(1),
            )
            .filter(episodes::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    /// Episodes across every season of a series.
    pub async fn count_episodes_for_series(&self, series_id: i32, active_only: bool) -> Result<u64> {
        let mut query = Episodes::find().filter(
            episodes::Column::SeasonId.in_subquery(
                Query::select()
                    .column(seasons::Column::Id)
                    .from(Seasons)
                    .and_where(Expr::col(seasons::Column::SeriesId).eq(series_id))
                    .to_owned(),
            ),
        );
        if active_only {
            query = query.filter(episodes::Column::IsActive.eq(true));
        }
        Ok(query.count(&self.conn).await?)
    }

    pub async fn count_episodes(&self) -> Result<u64> {
        Ok(Episodes::find().count(&self.conn).await?)
    }
}
