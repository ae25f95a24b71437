//! `SeaORM` implementation of the `ContentService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::api::types::{
    DashboardDto, EpisodeDto, PageQuery, Paginated, SeasonDto, SeriesDetailDto, SeriesSummaryDto,
};
use crate::config::Config;
use crate::db::{EpisodeFields, SeriesFields, Store, is_unique_violation};
use crate::domain::{self, PageRequest};
use crate::entities::drama_series;
use crate::models::catalog::{
    EpisodeInput, LinkKind, MediaUpdate, PersonKind, SeasonInput, SeriesInput,
};
use crate::services::catalog_service::{CatalogError, series_detail_dto, series_summaries};
use crate::services::content_service::ContentService;

const DUPLICATE_SEASON: &str = "A season with this number already exists for this drama series.";
const DUPLICATE_EPISODE: &str = "An episode with this number already exists for this season.";

pub struct SeaOrmContentService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

/// Maps a storage failure, turning unique-constraint hits into `message`.
fn storage_error(err: anyhow::Error, message: &str) -> CatalogError {
    if is_unique_violation(&err) {
        CatalogError::validation(message)
    } else {
        CatalogError::from(err)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SeaOrmContentService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn series_by_slug(&self, slug: &str) -> Result<drama_series::Model, CatalogError> {
        self.store
            .series()
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::not_found("Drama series", slug))
    }

    /// First free slug among `base`, `base-2`, `base-3`, ...
    async fn unique_slug(&self, base: &str) -> Result<String, CatalogError> {
        let base = if base.is_empty() { "series" } else { base };
        let mut candidate = base.to_string();
        let mut suffix = 2;

        while self.store.series().slug_exists(&candidate, None).await? {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }

        Ok(candidate)
    }

    /// Validates `input` and resolves the slug. `existing` is the row being updated.
    async fn series_fields(
        &self,
        input: SeriesInput,
        existing: Option<&drama_series::Model>,
    ) -> Result<SeriesFields, CatalogError> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(CatalogError::validation("Title is required"));
        }
        if title.chars().count() > 255 {
            return Err(CatalogError::validation(
                "Title must be 255 characters or less",
            ));
        }

        let rating = domain::validate_series_rating(input.rating)
            .map_err(|e| CatalogError::validation(e.to_string()))?;

        let trailer_url = non_blank(input.trailer_url)
            .map(|url| domain::validate_http_url(&url))
            .transpose()
            .map_err(|e| CatalogError::validation(e.to_string()))?;

        let trending_threshold = match input.trending_threshold {
            Some(value) if value < 0 => {
                return Err(CatalogError::validation(
                    "trending_threshold cannot be negative",
                ));
            }
            Some(value) => value,
            None => existing.map_or(
                self.config.read().await.catalog.default_trending_threshold,
                |e| e.trending_threshold,
            ),
        };

        if let Some(director_id) = input.director_id
            && self
                .store
                .people()
                .get(PersonKind::Director, director_id)
                .await?
                .is_none()
        {
            return Err(CatalogError::validation(format!(
                "Director {director_id} does not exist"
            )));
        }

        if let Some(rating_id) = input.content_rating_id
            && self
                .store
                .lookups()
                .get_content_rating(rating_id)
                .await?
                .is_none()
        {
            return Err(CatalogError::validation(format!(
                "Content rating {rating_id} does not exist"
            )));
        }

        let exclude_id = existing.map(|e| e.id);
        let slug = match (non_blank(input.slug), existing) {
            (Some(requested), _) => {
                let slug = domain::slugify(&requested);
                if slug.is_empty() {
                    return Err(CatalogError::validation(
                        "Slug must contain letters or digits",
                    ));
                }
                if self.store.series().slug_exists(&slug, exclude_id).await? {
                    return Err(CatalogError::validation(format!(
                        "Slug '{slug}' is already in use"
                    )));
                }
                slug
            }
            (None, Some(existing)) => existing.slug.clone(),
            (None, None) => self.unique_slug(&domain::slugify(&title)).await?,
        };

        Ok(SeriesFields {
            title,
            description: input.description,
            release_date: input.release_date,
            director_id: input.director_id,
            content_rating_id: input.content_rating_id,
            rating,
            poster_image: non_blank(input.poster_image),
            trailer_url,
            slug,
            is_featured: input.is_featured,
            featured_until: input.featured_until,
            trending_threshold,
        })
    }

    fn episode_fields(input: EpisodeInput) -> Result<EpisodeFields, CatalogError> {
        if input.episode_number < 1 {
            return Err(CatalogError::validation(
                "Episode number must be a positive integer",
            ));
        }

        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(CatalogError::validation("Title is required"));
        }

        let duration_secs = non_blank(input.duration)
            .map(|raw| domain::parse_duration(&raw))
            .transpose()
            .map_err(|e| CatalogError::validation(e.to_string()))?;

        let video_file = non_blank(input.video_file)
            .map(|url| domain::validate_http_url(&url))
            .transpose()
            .map_err(|e| CatalogError::validation(e.to_string()))?;

        Ok(EpisodeFields {
            episode_number: input.episode_number,
            title,
            description: input.description,
            release_date: input.release_date,
            duration_secs,
            video_file,
            video_file_name: non_blank(input.video_file_name),
            is_free: input.is_free,
            is_active: input.is_active,
        })
    }

    async fn season_dto(&self, season_id: i32) -> Result<SeasonDto, CatalogError> {
        let season = self
            .store
            .seasons()
            .get(season_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Season", season_id))?;
        let episodes = self
            .store
            .seasons()
            .episodes_of_season(season_id)
            .await?
            .into_iter()
            .map(EpisodeDto::from)
            .collect();
        Ok(SeasonDto::new(season, episodes))
    }

    async fn summary(&self, model: drama_series::Model) -> Result<SeriesSummaryDto, CatalogError> {
        let id = model.id;
        series_summaries(&self.store, vec![model], domain::today())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::not_found("Drama series", id))
    }
}

#[async_trait]
impl ContentService for SeaOrmContentService {
    async fn dashboard(&self) -> Result<DashboardDto, CatalogError> {
        Ok(DashboardDto {
            users: self.store.users().count().await?,
            series: self.store.series().count().await?,
            seasons: self.store.seasons().count().await?,
            episodes: self.store.seasons().count_episodes().await?,
            reviews: self.store.engagement().count_reviews().await?,
            likes: self.store.engagement().count_likes().await?,
            featured_series: self.store.series().count_featured(domain::today()).await?,
        })
    }

    async fn list_series(
        &self,
        title: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<SeriesSummaryDto>, CatalogError> {
        let size = self.config.read().await.catalog.admin_large_page_size;
        let request = PageRequest::clamped(page.page, page.page_size, size, size);

        let page = self
            .store
            .series()
            .list_admin(title.as_deref(), request)
            .await?;
        let results = series_summaries(&self.store, page.items, domain::today()).await?;

        Ok(Paginated {
            count: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            results,
        })
    }

    async fn get_series(&self, slug: &str) -> Result<SeriesDetailDto, CatalogError> {
        let model = self.series_by_slug(slug).await?;
        Ok(series_detail_dto(&self.store, model, domain::today(), false).await?)
    }

    async fn create_series(&self, input: SeriesInput) -> Result<SeriesSummaryDto, CatalogError> {
        let fields = self.series_fields(input, None).await?;
        let model = self
            .store
            .series()
            .create(fields)
            .await
            .map_err(|e| storage_error(e, "A drama series with this slug already exists"))?;

        info!(series_id = model.id, slug = %model.slug, "Drama series created");
        self.summary(model).await
    }

    async fn update_series(
        &self,
        slug: &str,
        input: SeriesInput,
    ) -> Result<SeriesSummaryDto, CatalogError> {
        let existing = self.series_by_slug(slug).await?;
        let fields = self.series_fields(input, Some(&existing)).await?;

        let model = self
            .store
            .series()
            .update(existing.id, fields)
            .await
            .map_err(|e| storage_error(e, "A drama series with this slug already exists"))?
            .ok_or_else(|| CatalogError::not_found("Drama series", slug))?;

        self.summary(model).await
    }

    async fn delete_series(&self, slug: &str) -> Result<(), CatalogError> {
        let existing = self.series_by_slug(slug).await?;
        self.store.series().delete(existing.id).await?;
        info!(series_id = existing.id, slug, "Drama series deleted");
        Ok(())
    }

    async fn replace_links(
        &self,
        slug: &str,
        kind: LinkKind,
        mut ids: Vec<i32>,
    ) -> Result<SeriesDetailDto, CatalogError> {
        let series = self.series_by_slug(slug).await?;

        ids.sort_unstable();
        ids.dedup();

        let known = self.store.series().count_existing(kind, &ids).await?;
        if known != ids.len() as u64 {
            return Err(CatalogError::validation(format!(
                "Unknown {} id in {ids:?}",
                kind.label()
            )));
        }

        self.store.series().replace_links(series.id, kind, &ids).await?;

        Ok(series_detail_dto(&self.store, series, domain::today(), false).await?)
    }

    async fn create_season(
        &self,
        slug: &str,
        input: SeasonInput,
    ) -> Result<SeasonDto, CatalogError> {
        let series = self.series_by_slug(slug).await?;

        if input.season_number < 1 {
            return Err(CatalogError::validation(
                "Season number must be a positive integer",
            ));
        }

        if self
            .store
            .seasons()
            .number_taken(series.id, input.season_number, None)
            .await?
        {
            return Err(CatalogError::validation(DUPLICATE_SEASON));
        }

        let season = self
            .store
            .seasons()
            .create(series.id, input)
            .await
            .map_err(|e| storage_error(e, DUPLICATE_SEASON))?;

        Ok(SeasonDto::new(season, Vec::new()))
    }

    async fn get_season(&self, id: i32) -> Result<SeasonDto, CatalogError> {
        self.season_dto(id).await
    }

    async fn update_season(&self, id: i32, input: SeasonInput) -> Result<SeasonDto, CatalogError> {
        let season = self
            .store
            .seasons()
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Season", id))?;

        if input.season_number < 1 {
            return Err(CatalogError::validation(
                "Season number must be a positive integer",
            ));
        }

        if self
            .store
            .seasons()
            .number_taken(season.series_id, input.season_number, Some(id))
            .await?
        {
            return Err(CatalogError::validation(DUPLICATE_SEASON));
        }

        self.store
            .seasons()
            .update(id, input)
            .await
            .map_err(|e| storage_error(e, DUPLICATE_SEASON))?;

        self.season_dto(id).await
    }

    async fn delete_season(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.seasons().delete(id).await? {
            return Err(CatalogError::not_found("Season", id));
        }
        Ok(())
    }

    async fn season_episodes(&self, season_id: i32) -> Result<Vec<EpisodeDto>, CatalogError> {
        Ok(self.season_dto(season_id).await?.episodes)
    }

    async fn create_episode(
        &self,
        season_id: i32,
        input: EpisodeInput,
    ) -> Result<EpisodeDto, CatalogError> {
        if self.store.seasons().get(season_id).await?.is_none() {
            return Err(CatalogError::not_found("Season", season_id));
        }

        let fields = Self::episode_fields(input)?;
        if self
            .store
            .seasons()
            .episode_number_taken(season_id, fields.episode_number, None)
            .await?
        {
            return Err(CatalogError::validation(DUPLICATE_EPISODE));
        }

        let episode = self
            .store
            .seasons()
            .create_episode(season_id, fields)
            .await
            .map_err(|e| storage_error(e, DUPLICATE_EPISODE))?;

        Ok(EpisodeDto::from(episode))
    }

    async fn update_episode(
        &self,
        id: i32,
        input: EpisodeInput,
    ) -> Result<EpisodeDto, CatalogError> {
        let existing = self
            .store
            .seasons()
            .get_episode(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Episode", id))?;

        let fields = Self::episode_fields(input)?;
        if self
            .store
            .seasons()
            .episode_number_taken(existing.season_id, fields.episode_number, Some(id))
            .await?
        {
            return Err(CatalogError::validation(DUPLICATE_EPISODE));
        }

        let episode = self
            .store
            .seasons()
            .update_episode(id, fields)
            .await
            .map_err(|e| storage_error(e, DUPLICATE_EPISODE))?
            .ok_or_else(|| CatalogError::not_found("Episode", id))?;

        Ok(EpisodeDto::from(episode))
    }

    async fn delete_episode(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.seasons().delete_episode(id).await? {
            return Err(CatalogError::not_found("Episode", id));
        }
        Ok(())
    }

    async fn update_media(&self, id: i32, input: MediaUpdate) -> Result<EpisodeDto, CatalogError> {
        let video_file = domain::validate_http_url(&input.video_file)
            .map_err(|e| CatalogError::validation(e.to_string()))?;

        let episode = self
            .store
            .seasons()
            .update_media(id, video_file, non_blank(input.video_file_name))
            .await?
            .ok_or_else(|| CatalogError::not_found("Episode", id))?;

        info!(episode_id = id, "Episode media updated");
        Ok(EpisodeDto::from(episode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode_input(number: i32, duration: Option<&str>) -> EpisodeInput {
        EpisodeInput {
            episode_number: number,
            title: "Pilot".to_string(),
            description: None,
            release_date: None,
            duration: duration.map(str::to_string),
            video_file: None,
            video_file_name: None,
            is_free: true,
            is_active: true,
        }
    }

    #[test]
    fn test_episode_fields_parses_duration() {
        let fields = SeaOrmContentService::episode_fields(episode_input(1, Some("00:45:30")))
            .unwrap();
        assert_eq!(fields.duration_secs, Some(2730));

        let fields = SeaOrmContentService::episode_fields(episode_input(1, Some("  "))).unwrap();
        assert_eq!(fields.duration_secs, None);
    }

    #[test]
    fn test_episode_fields_rejects_bad_input() {
        assert!(SeaOrmContentService::episode_fields(episode_input(0, None)).is_err());
        assert!(SeaOrmContentService::episode_fields(episode_input(1, Some("1:99:00"))).is_err());

        let mut input = episode_input(1, None);
        input.title = "   ".to_string();
        assert!(SeaOrmContentService::episode_fields(input).is_err());
    }
}
