//! `SeaORM` implementation of the `CatalogService` trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::types::{
    CategoryDto, ContentRatingDto, ContinueWatchingDto, EpisodeDto, HomeDto, LanguageDto,
    LookupsDto, PageQuery, Paginated, SeasonDto, SeriesDetailDto, SeriesSummaryDto, TagDto,
};
use crate::config::Config;
use crate::db::{FilterThresholds, Store};
use crate::domain::{self, PageRequest, SeriesKey};
use crate::models::catalog::SeriesFilter;
use crate::services::catalog_service::{
    CatalogError, CatalogService, resolve_series, seasons_with_episodes, series_detail_dto,
    series_summaries, visible_episode,
};

pub struct SeaOrmCatalogService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn continue_watching(
        &self,
        user_id: i32,
        limit: u64,
    ) -> Result<Vec<ContinueWatchingDto>, CatalogError> {
        let progress = self
            .store
            .engagement()
            .progress_for_user(user_id, true, Some(limit))
            .await?;
        if progress.is_empty() {
            return Ok(Vec::new());
        }

        let episode_ids: Vec<i32> = progress.iter().map(|p| p.episode_id).collect();
        let episodes: HashMap<i32, _> = self
            .store
            .seasons()
            .get_episodes(&episode_ids)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        let season_ids: Vec<i32> = episodes.values().map(|e| e.season_id).collect();
        let seasons: HashMap<i32, _> = self
            .store
            .seasons()
            .get_many(&season_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let series_ids: Vec<i32> = seasons.values().map(|s| s.series_id).collect();
        let series: HashMap<i32, _> = self
            .store
            .series()
            .get_many(&series_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut entries = Vec::with_capacity(progress.len());
        for entry in progress {
            let Some(episode) = episodes.get(&entry.episode_id).filter(|e| e.is_active) else {
                continue;
            };
            let Some(season) = seasons.get(&episode.season_id) else {
                continue;
            };
            let Some(parent) = series.get(&season.series_id) else {
                continue;
            };

            entries.push(ContinueWatchingDto {
                series_id: parent.id,
                series_title: parent.title.clone(),
                series_slug: parent.slug.clone(),
                season_number: season.season_number,
                episode: EpisodeDto::from(episode.clone()),
                position_secs: entry.position_secs,
                completed: entry.completed,
                updated_at: entry.updated_at,
            });
        }

        Ok(entries)
    }

    async fn you_might_like(
        &self,
        user_id: Option<i32>,
        limit: u64,
    ) -> Result<Vec<crate::entities::drama_series::Model>, CatalogError> {
        let liked = match user_id {
            Some(id) => self.store.engagement().liked_series_ids(id).await?,
            None => Vec::new(),
        };

        if !liked.is_empty() {
            let similar = self.store.series().similar_by_category(&liked, limit).await?;
            if !similar.is_empty() {
                return Ok(similar);
            }
        }

        Ok(self.store.series().top_rated(limit, &liked).await?)
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn home(&self, user_id: Option<i32>) -> Result<HomeDto, CatalogError> {
        let limit = self.config.read().await.catalog.home_section_size;
        let today = domain::today();
        let series = self.store.series();

        let featured = series.featured(today, limit).await?;
        let trending = series.trending(limit).await?;
        let upcoming = series.upcoming(today, limit).await?;
        let newest = series.newest(limit).await?;
        let top_ten = series.top_rated(limit, &[]).await?;
        let most_popular = series.most_popular(limit).await?;
        let you_might_like = self.you_might_like(user_id, limit).await?;

        let continue_watching = match user_id {
            Some(id) => self.continue_watching(id, limit).await?,
            None => Vec::new(),
        };

        Ok(HomeDto {
            featured_dramas: series_summaries(&self.store, featured, today).await?,
            trending_dramas: series_summaries(&self.store, trending, today).await?,
            upcoming_dramas: series_summaries(&self.store, upcoming, today).await?,
            new_dramas: series_summaries(&self.store, newest, today).await?,
            top_ten: series_summaries(&self.store, top_ten, today).await?,
            most_popular: series_summaries(&self.store, most_popular, today).await?,
            continue_watching,
            you_might_like: series_summaries(&self.store, you_might_like, today).await?,
        })
    }

    async fn list_series(
        &self,
        filter: SeriesFilter,
        page: PageQuery,
    ) -> Result<Paginated<SeriesSummaryDto>, CatalogError> {
        let (request, thresholds) = {
            let config = self.config.read().await;
            let catalog = &config.catalog;
            (
                PageRequest::clamped(
                    page.page,
                    page.page_size,
                    catalog.default_page_size,
                    catalog.max_page_size,
                ),
                FilterThresholds {
                    popular_views: catalog.popular_view_threshold,
                    top_searched: catalog.top_searched_threshold,
                    new_release_days: catalog.new_release_days,
                },
            )
        };

        let today = domain::today();
        let page = self
            .store
            .series()
            .list(&filter, thresholds, today, request)
            .await?;

        if let Some(term) = filter.search_term() {
            let ids: Vec<i32> = page.items.iter().map(|m| m.id).collect();
            debug!(term, hits = ids.len(), "Recording series search");
            self.store.series().increment_search_count(&ids).await?;
        }

        let items = series_summaries(&self.store, page.items, today).await?;
        Ok(Paginated {
            count: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            results: items,
        })
    }

    async fn series_detail(&self, key: &SeriesKey) -> Result<SeriesDetailDto, CatalogError> {
        let mut model = resolve_series(&self.store, key).await?;

        self.store.series().increment_view_count(model.id).await?;
        metrics::counter!("catalog_series_views_total").increment(1);
        model.view_count += 1;

        Ok(series_detail_dto(&self.store, model, domain::today(), true).await?)
    }

    async fn series_seasons(&self, key: &SeriesKey) -> Result<Vec<SeasonDto>, CatalogError> {
        let model = resolve_series(&self.store, key).await?;
        Ok(seasons_with_episodes(&self.store, model.id, true).await?)
    }

    async fn episode_detail(&self, id: i32) -> Result<EpisodeDto, CatalogError> {
        let mut episode = visible_episode(self.store.seasons().get_episode(id).await?)
            .ok_or_else(|| CatalogError::not_found("Episode", id))?;

        self.store.seasons().increment_episode_views(id).await?;
        episode.view_count += 1;

        Ok(EpisodeDto::from(episode))
    }

    async fn lookups(&self) -> Result<LookupsDto, CatalogError> {
        Ok(LookupsDto {
            categories: self.categories().await?,
            tags: self.tags().await?,
            languages: self.languages().await?,
            content_ratings: self.content_ratings().await?,
        })
    }

    async fn categories(&self) -> Result<Vec<CategoryDto>, CatalogError> {
        let rows = self.store.lookups().all_categories().await?;
        Ok(rows.into_iter().map(CategoryDto::from).collect())
    }

    async fn tags(&self) -> Result<Vec<TagDto>, CatalogError> {
        let rows = self.store.lookups().all_tags().await?;
        Ok(rows.into_iter().map(TagDto::from).collect())
    }

    async fn languages(&self) -> Result<Vec<LanguageDto>, CatalogError> {
        let rows = self.store.lookups().all_languages().await?;
        Ok(rows.into_iter().map(LanguageDto::from).collect())
    }

    async fn content_ratings(&self) -> Result<Vec<ContentRatingDto>, CatalogError> {
        let rows = self.store.lookups().all_content_ratings().await?;
        Ok(rows.into_iter().map(ContentRatingDto::from).collect())
    }
}
