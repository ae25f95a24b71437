//! Back-office management of series, their link sets, seasons and episodes.

use crate::api::types::{
    DashboardDto, EpisodeDto, PageQuery, Paginated, SeasonDto, SeriesDetailDto, SeriesSummaryDto,
};
use crate::models::catalog::{EpisodeInput, LinkKind, MediaUpdate, SeasonInput, SeriesInput};
use crate::services::catalog_service::CatalogError;

#[async_trait::async_trait]
pub trait ContentService: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardDto, CatalogError>;

    /// Newest first, `title` is a contains filter.
    async fn list_series(
        &self,
        title: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<SeriesSummaryDto>, CatalogError>;

    /// Detail including inactive episodes. Does not count as a view.
    async fn get_series(&self, slug: &str) -> Result<SeriesDetailDto, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for out-of-range ratings, bad URLs,
    /// unknown director or content rating ids, or a slug already in use.
    async fn create_series(&self, input: SeriesInput) -> Result<SeriesSummaryDto, CatalogError>;

    async fn update_series(
        &self,
        slug: &str,
        input: SeriesInput,
    ) -> Result<SeriesSummaryDto, CatalogError>;

    async fn delete_series(&self, slug: &str) -> Result<(), CatalogError>;

    /// Replaces the whole set of linked ids of one kind.
    async fn replace_links(
        &self,
        slug: &str,
        kind: LinkKind,
        ids: Vec<i32>,
    ) -> Result<SeriesDetailDto, CatalogError>;

    async fn create_season(&self, slug: &str, input: SeasonInput)
    -> Result<SeasonDto, CatalogError>;

    async fn get_season(&self, id: i32) -> Result<SeasonDto, CatalogError>;

    async fn update_season(&self, id: i32, input: SeasonInput) -> Result<SeasonDto, CatalogError>;

    async fn delete_season(&self, id: i32) -> Result<(), CatalogError>;

    /// Every episode of the season, inactive included, by id.
    async fn season_episodes(&self, season_id: i32) -> Result<Vec<EpisodeDto>, CatalogError>;

    async fn create_episode(
        &self,
        season_id: i32,
        input: EpisodeInput,
    ) -> Result<EpisodeDto, CatalogError>;

    async fn update_episode(&self, id: i32, input: EpisodeInput)
    -> Result<EpisodeDto, CatalogError>;

    async fn delete_episode(&self, id: i32) -> Result<(), CatalogError>;

    /// Records where the uploaded video is served from.
    async fn update_media(&self, id: i32, input: MediaUpdate) -> Result<EpisodeDto, CatalogError>;
}
