//! Public catalog reads: the home page, the filtered series listing, series and
//! episode detail, and the lookup helpers.
//!
//! The builders at the bottom of this module turn series rows into DTOs and are
//! shared with the back-office and engagement services.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::api::types::{
    CategoryDto, ContentRatingDto, EpisodeDto, HomeDto, LanguageDto, LookupsDto, PageQuery,
    Paginated, PersonDto, SeasonDto, SeriesDetailDto, SeriesSummaryDto, TagDto,
};
use crate::db::Store;
use crate::domain::SeriesKey;
use crate::entities::{drama_series, episodes};
use crate::models::catalog::{PersonKind, SeriesFilter};

/// Errors of the catalog and back-office content operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{resource} {key} not found")]
    NotFound { resource: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn not_found(resource: &'static str, key: impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Home page sections. `continue_watching` and the personalised part of
    /// `you_might_like` need a signed-in user.
    async fn home(&self, user_id: Option<i32>) -> Result<HomeDto, CatalogError>;

    /// Filtered listing ordered by id. A search bumps `search_count` of the
    /// series on the returned page.
    async fn list_series(
        &self,
        filter: SeriesFilter,
        page: PageQuery,
    ) -> Result<Paginated<SeriesSummaryDto>, CatalogError>;

    /// Full detail. Counts as one view.
    async fn series_detail(&self, key: &SeriesKey) -> Result<SeriesDetailDto, CatalogError>;

    async fn series_seasons(&self, key: &SeriesKey) -> Result<Vec<SeasonDto>, CatalogError>;

    /// Active episode only. Counts as one view.
    async fn episode_detail(&self, id: i32) -> Result<EpisodeDto, CatalogError>;

    async fn lookups(&self) -> Result<LookupsDto, CatalogError>;

    async fn categories(&self) -> Result<Vec<CategoryDto>, CatalogError>;

    async fn tags(&self) -> Result<Vec<TagDto>, CatalogError>;

    async fn languages(&self) -> Result<Vec<LanguageDto>, CatalogError>;

    async fn content_ratings(&self) -> Result<Vec<ContentRatingDto>, CatalogError>;
}

pub async fn resolve_series(
    store: &Store,
    key: &SeriesKey,
) -> Result<drama_series::Model, CatalogError> {
    let found = match key {
        SeriesKey::Id(id) => store.series().get(*id).await?,
        SeriesKey::Slug(slug) => store.series().get_by_slug(slug).await?,
    };
    found.ok_or_else(|| CatalogError::not_found("Drama series", key))
}

/// Summaries with category, tag and language names loaded in one batch.
pub async fn series_summaries(
    store: &Store,
    models: Vec<drama_series::Model>,
    today: NaiveDate,
) -> anyhow::Result<Vec<SeriesSummaryDto>> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut links = store.series().link_names(&ids).await?;

    Ok(models
        .into_iter()
        .map(|model| {
            let entry = links.remove(&model.id).unwrap_or_default();
            let mut dto = SeriesSummaryDto::from_model(model, today);
            dto.categories = entry.categories;
            dto.tags = entry.tags;
            dto.languages = entry.languages;
            dto
        })
        .collect())
}

/// Seasons of a series in number order, each with its episodes.
pub async fn seasons_with_episodes(
    store: &Store,
    series_id: i32,
    active_only: bool,
) -> anyhow::Result<Vec<SeasonDto>> {
    let seasons = store.seasons().for_series(series_id).await?;
    let season_ids: Vec<i32> = seasons.iter().map(|s| s.id).collect();

    let mut by_season: HashMap<i32, Vec<EpisodeDto>> = HashMap::new();
    for episode in store
        .seasons()
        .episodes_for_seasons(&season_ids, active_only)
        .await?
    {
        by_season
            .entry(episode.season_id)
            .or_default()
            .push(EpisodeDto::from(episode));
    }

    Ok(seasons
        .into_iter()
        .map(|season| {
            let episodes = by_season.remove(&season.id).unwrap_or_default();
            SeasonDto::new(season, episodes)
        })
        .collect())
}

pub async fn series_detail_dto(
    store: &Store,
    model: drama_series::Model,
    today: NaiveDate,
    active_only: bool,
) -> anyhow::Result<SeriesDetailDto> {
    let series_id = model.id;

    let director = match model.director_id {
        Some(id) => store
            .people()
            .get(PersonKind::Director, id)
            .await?
            .map(PersonDto::from),
        None => None,
    };

    let content_rating = match model.content_rating_id {
        Some(id) => store
            .lookups()
            .get_content_rating(id)
            .await?
            .map(ContentRatingDto::from),
        None => None,
    };

    let cast = store
        .series()
        .cast(series_id)
        .await?
        .into_iter()
        .map(|actor| PersonDto::from(crate::db::Person::from(actor)))
        .collect();

    let seasons = seasons_with_episodes(store, series_id, active_only).await?;
    let total_episodes = store
        .seasons()
        .count_episodes_for_series(series_id, false)
        .await?;
    let like_count = store.engagement().like_count(series_id).await?;
    let stats = store.engagement().review_stats(series_id).await?;

    let series = series_summaries(store, vec![model], today)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Series {series_id} summary missing"))?;

    Ok(SeriesDetailDto {
        series,
        director,
        content_rating,
        cast,
        seasons,
        total_episodes,
        like_count,
        review_count: stats.count,
        average_review_rating: stats.average,
    })
}

/// Active episodes are the only ones the public side may see.
#[must_use]
pub fn visible_episode(episode: Option<episodes::Model>) -> Option<episodes::Model> {
    episode.filter(|e| e.is_active)
}
