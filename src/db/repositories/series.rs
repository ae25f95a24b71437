use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

use super::{Page, fetch_page, timestamp};
use crate::domain::{PageRequest, new_release_cutoff};
use crate::entities::{
    actors, categories, drama_series, drama_series_cast, drama_series_categories,
    drama_series_languages, drama_series_tags, languages, prelude::*, tags,
};
use crate::models::catalog::{LinkKind, SeriesFilter};

/// Resolved column values for inserting or replacing a series.
#[derive(Debug, Clone)]
pub struct SeriesFields {
    pub title: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub director_id: Option<i32>,
    pub content_rating_id: Option<i32>,
    pub rating: f64,
    pub poster_image: Option<String>,
    pub trailer_url: Option<String>,
    pub slug: String,
    pub is_featured: bool,
    pub featured_until: Option<NaiveDate>,
    pub trending_threshold: i64,
}

/// Thresholds the boolean list filters compare against.
#[derive(Debug, Clone, Copy)]
pub struct FilterThresholds {
    pub popular_views: i64,
    pub top_searched: i64,
    pub new_release_days: u32,
}

/// Names attached to a series through the join tables.
#[derive(Debug, Clone, Default)]
pub struct SeriesLinks {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub languages: Vec<String>,
}

pub struct SeriesRepository {
    conn: DatabaseConnection,
}

impl SeriesRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<drama_series::Model>> {
        Ok(DramaSeries::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<drama_series::Model>> {
        Ok(DramaSeries::find()
            .filter(drama_series::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?)
    }

    pub async fn get_many(&self, ids: &[i32]) -> Result<Vec<drama_series::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(DramaSeries::find()
            .filter(drama_series::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await?)
    }

    pub async fn slug_exists(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool> {
        let mut query = DramaSeries::find().filter(drama_series::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(drama_series::Column::Id.ne(id));
        }
        Ok(query.count(&self.conn).await? > 0)
    }

    /// Public listing ordered by id.
    pub async fn list(
        &self,
        filter: &SeriesFilter,
        thresholds: FilterThresholds,
        today: NaiveDate,
        page: PageRequest,
    ) -> Result<Page<drama_series::Model>> {
        let mut query = DramaSeries::find().order_by_asc(drama_series::Column::Id);

        if let Some(term) = filter.search_term() {
            query = query.filter(
                Condition::any()
                    .add(drama_series::Column::Title.contains(term))
                    .add(drama_series::Column::Description.contains(term)),
            );
        }

        if let Some(category) = filter.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                drama_series::Column::Id.in_subquery(
                    Query::select()
                        .column((
                            DramaSeriesCategories,
                            drama_series_categories::Column::SeriesId,
                        ))
                        .from(DramaSeriesCategories)
                        .inner_join(
                            Categories,
                            Expr::col((Categories, categories::Column::Id)).equals((
                                DramaSeriesCategories,
                                drama_series_categories::Column::CategoryId,
                            )),
                        )
                        .and_where(Expr::col((Categories, categories::Column::Name)).eq(category))
                        .to_owned(),
                ),
            );
        }

        if let Some(tag) = filter.tag.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                drama_series::Column::Id.in_subquery(
                    Query::select()
                        .column((DramaSeriesTags, drama_series_tags::Column::SeriesId))
                        .from(DramaSeriesTags)
                        .inner_join(
                            Tags,
                            Expr::col((Tags, tags::Column::Id))
                                .equals((DramaSeriesTags, drama_series_tags::Column::TagId)),
                        )
                        .and_where(Expr::col((Tags, tags::Column::Name)).eq(tag))
                        .to_owned(),
                ),
            );
        }

        if filter.is_popular == Some(true) {
            query = query.filter(drama_series::Column::ViewCount.gte(thresholds.popular_views));
        }

        if filter.is_trending == Some(true) {
            query = query.filter(trending_condition());
        }

        if filter.is_featured == Some(true) {
            query = query.filter(featured_condition(today));
        }

        if filter.new_release == Some(true) {
            let cutoff = new_release_cutoff(today, thresholds.new_release_days);
            query = query.filter(drama_series::Column::ReleaseDate.gte(cutoff));
        }

        if filter.top_searched == Some(true) {
            query = query.filter(drama_series::Column::SearchCount.gte(thresholds.top_searched));
        }

        fetch_page(&self.conn, query, page).await
    }

    /// Back-office listing, newest first.
    pub async fn list_admin(
        &self,
        title: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<drama_series::Model>> {
        let mut query = DramaSeries::find()
            .order_by_desc(drama_series::Column::CreatedAt)
            .order_by_desc(drama_series::Column::Id);

        if let Some(title) = title.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(drama_series::Column::Title.contains(title));
        }

        fetch_page(&self.conn, query, page).await
    }

    pub async fn create(&self, fields: SeriesFields) -> Result<drama_series::Model> {
        let now = timestamp();
        let model = drama_series::ActiveModel {
            title: Set(fields.title),
            description: Set(fields.description),
            release_date: Set(fields.release_date),
            director_id: Set(fields.director_id),
            content_rating_id: Set(fields.content_rating_id),
            rating: Set(fields.rating),
            poster_image: Set(fields.poster_image),
            trailer_url: Set(fields.trailer_url),
            slug: Set(fields.slug),
            view_count: Set(0),
            search_count: Set(0),
            is_featured: Set(fields.is_featured),
            featured_until: Set(fields.featured_until),
            trending_threshold: Set(fields.trending_threshold),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update(
        &self,
        id: i32,
        fields: SeriesFields,
    ) -> Result<Option<drama_series::Model>> {
        let Some(existing) = DramaSeries::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: drama_series::ActiveModel = existing.into();
        active.title = Set(fields.title);
        active.description = Set(fields.description);
        active.release_date = Set(fields.release_date);
        active.director_id = Set(fields.director_id);
        active.content_rating_id = Set(fields.content_rating_id);
        active.rating = Set(fields.rating);
        active.poster_image = Set(fields.poster_image);
        active.trailer_url = Set(fields.trailer_url);
        active.slug = Set(fields.slug);
        active.is_featured = Set(fields.is_featured);
        active.featured_until = Set(fields.featured_until);
        active.trending_threshold = Set(fields.trending_threshold);
        active.updated_at = Set(timestamp());

        Ok(Some(active.update(&self.conn).await?))
    }

    /// Seasons, episodes, links, reviews and likes cascade.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = DramaSeries::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn increment_view_count(&self, id: i32) -> Result<()> {
        DramaSeries::update_many()
            .col_expr(
                drama_series::Column::ViewCount,
                Expr::col(drama_series::Column::ViewCount).add(1),
            )
            .filter(drama_series::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn increment_search_count(&self, ids: &[i32]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        DramaSeries::update_many()
            .col_expr(
                drama_series::Column::SearchCount,
                Expr::col(drama_series::Column::SearchCount).add(1),
            )
            .filter(drama_series::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // Home sections

    pub async fn featured(&self, today: NaiveDate, limit: u64) -> Result<Vec<drama_series::Model>> {
        Ok(DramaSeries::find()
            .filter(featured_condition(today))
            .order_by_asc(drama_series::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn trending(&self, limit: u64) -> Result<Vec<drama_series::Model>> {
        Ok(DramaSeries::find()
            .filter(trending_condition())
            .order_by_desc(drama_series::Column::ViewCount)
            .order_by_asc(drama_series::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn upcoming(&self, today: NaiveDate, limit: u64) -> Result<Vec<drama_series::Model>> {
        Ok(DramaSeries::find()
            .filter(drama_series::Column::ReleaseDate.gt(today))
            .order_by_asc(drama_series::Column::ReleaseDate)
            .order_by_asc(drama_series::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn newest(&self, limit: u64) -> Result<Vec<drama_series::Model>> {
        Ok(DramaSeries::find()
            .order_by_desc(drama_series::Column::CreatedAt)
            .order_by_desc(drama_series::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn top_rated(&self, limit: u64, exclude: &[i32]) -> Result<Vec<drama_series::Model>> {
        let mut query = DramaSeries::find()
            .order_by_desc(drama_series::Column::Rating)
            .order_by_asc(drama_series::Column::Id)
            .limit(limit);
        if !exclude.is_empty() {
            query = query.filter(drama_series::Column::Id.is_not_in(exclude.iter().copied()));
        }
        Ok(query.all(&self.conn).await?)
    }

    pub async fn most_popular(&self, limit: u64) -> Result<Vec<drama_series::Model>> {
        Ok(DramaSeries::find()
            .order_by_desc(drama_series::Column::ViewCount)
            .order_by_asc(drama_series::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    /// Series sharing a category with any of `seed_ids`, excluding the seeds, best rated first.
    pub async fn similar_by_category(
        &self,
        seed_ids: &[i32],
        limit: u64,
    ) -> Result<Vec<drama_series::Model>> {
        if seed_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut category_ids: Vec<i32> = DramaSeriesCategories::find()
            .filter(drama_series_categories::Column::SeriesId.is_in(seed_ids.iter().copied()))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|link| link.category_id)
            .collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(DramaSeries::find()
            .filter(
                drama_series::Column::Id.in_subquery(
                    Query::select()
                        .column(drama_series_categories::Column::SeriesId)
                        .from(DramaSeriesCategories)
                        .and_where(
                            Expr::col(drama_series_categories::Column::CategoryId)
                                .is_in(category_ids),
                        )
                        .to_owned(),
                ),
            )
            .filter(drama_series::Column::Id.is_not_in(seed_ids.iter().copied()))
            .order_by_desc(drama_series::Column::Rating)
            .order_by_asc(drama_series::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    // Links

    pub async fn link_names(&self, series_ids: &[i32]) -> Result<HashMap<i32, SeriesLinks>> {
        let mut links: HashMap<i32, SeriesLinks> = HashMap::new();
        if series_ids.is_empty() {
            return Ok(links);
        }

        let category_rows = DramaSeriesCategories::find()
            .filter(drama_series_categories::Column::SeriesId.is_in(series_ids.iter().copied()))
            .find_also_related(Categories)
            .all(&self.conn)
            .await?;
        for (link, category) in category_rows {
            if let Some(category) = category {
                links.entry(link.series_id).or_default().categories.push(category.name);
            }
        }

        let tag_rows = DramaSeriesTags::find()
            .filter(drama_series_tags::Column::SeriesId.is_in(series_ids.iter().copied()))
            .find_also_related(Tags)
            .all(&self.conn)
            .await?;
        for (link, tag) in tag_rows {
            if let Some(tag) = tag {
                links.entry(link.series_id).or_default().tags.push(tag.name);
            }
        }

        let language_rows = DramaSeriesLanguages::find()
            .filter(drama_series_languages::Column::SeriesId.is_in(series_ids.iter().copied()))
            .find_also_related(Languages)
            .all(&self.conn)
            .await?;
        for (link, language) in language_rows {
            if let Some(language) = language {
                links.entry(link.series_id).or_default().languages.push(language.name);
            }
        }

        for entry in links.values_mut() {
            entry.categories.sort();
            entry.tags.sort();
            entry.languages.sort();
        }

        Ok(links)
    }

    pub async fn cast(&self, series_id: i32) -> Result<Vec<actors::Model>> {
        let rows = DramaSeriesCast::find()
            .filter(drama_series_cast::Column::SeriesId.eq(series_id))
            .find_also_related(Actors)
            .all(&self.conn)
            .await?;

        let mut cast: Vec<actors::Model> = rows.into_iter().filter_map(|(_, actor)| actor).collect();
        cast.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cast)
    }

    /// Number of `ids` that exist in the table behind `kind`.
    pub async fn count_existing(&self, kind: LinkKind, ids: &[i32]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids = ids.iter().copied();
        let count = match kind {
            LinkKind::Tags => {
                Tags::find()
                    .filter(tags::Column::Id.is_in(ids))
                    .count(&self.conn)
                    .await?
            }
            LinkKind::Languages => {
                Languages::find()
                    .filter(languages::Column::Id.is_in(ids))
                    .count(&self.conn)
                    .await?
            }
            LinkKind::Categories => {
                Categories::find()
                    .filter(categories::Column::Id.is_in(ids))
                    .count(&self.conn)
                    .await?
            }
            LinkKind::Cast => {
                Actors::find()
                    .filter(actors::Column::Id.is_in(ids))
                    .count(&self.conn)
                    .await?
            }
        };
        Ok(count)
    }

    /// Replaces the whole link set of one kind in a single transaction.
    pub async fn replace_links(&self, series_id: i32, kind: LinkKind, ids: &[i32]) -> Result<()> {
        let now = timestamp();
        let txn = self.conn.begin().await?;

        match kind {
            LinkKind::Tags => {
                DramaSeriesTags::delete_many()
                    .filter(drama_series_tags::Column::SeriesId.eq(series_id))
                    .exec(&txn)
                    .await?;
                if !ids.is_empty() {
                    let rows = ids.iter().map(|id| drama_series_tags::ActiveModel {
                        series_id: Set(series_id),
                        tag_id: Set(*id),
                        created_at: Set(now.clone()),
                    });
                    DramaSeriesTags::insert_many(rows)
                        .exec_without_returning(&txn)
                        .await?;
                }
            }
            LinkKind::Languages => {
                DramaSeriesLanguages::delete_many()
                    .filter(drama_series_languages::Column::SeriesId.eq(series_id))
                    .exec(&txn)
                    .await?;
                if !ids.is_empty() {
                    let rows = ids.iter().map(|id| drama_series_languages::ActiveModel {
                        series_id: Set(series_id),
                        language_id: Set(*id),
                        created_at: Set(now.clone()),
                    });
                    DramaSeriesLanguages::insert_many(rows)
                        .exec_without_returning(&txn)
                        .await?;
                }
            }
            LinkKind::Categories => {
                DramaSeriesCategories::delete_many()
                    .filter(drama_series_categories::Column::SeriesId.eq(series_id))
                    .exec(&txn)
                    .await?;
                if !ids.is_empty() {
                    let rows = ids.iter().map(|id| drama_series_categories::ActiveModel {
                        series_id: Set(series_id),
                        category_id: Set(*id),
                        created_at: Set(now.clone()),
                    });
                    DramaSeriesCategories::insert_many(rows)
                        .exec_without_returning(&txn)
                        .await?;
                }
            }
            LinkKind::Cast => {
                DramaSeriesCast::delete_many()
                    .filter(drama_series_cast::Column::SeriesId.eq(series_id))
                    .exec(&txn)
                    .await?;
                if !ids.is_empty() {
                    let rows = ids.iter().map(|id| drama_series_cast::ActiveModel {
                        series_id: Set(series_id),
                        actor_id: Set(*id),
                        created_at: Set(now.clone()),
                    });
                    DramaSeriesCast::insert_many(rows)
                        .exec_without_returning(&txn)
                        .await?;
                }
            }
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(DramaSeries::find().count(&self.conn).await?)
    }

    pub async fn count_featured(&self, today: NaiveDate) -> Result<u64> {
        Ok(DramaSeries::find()
            .filter(featured_condition(today))
            .count(&self.conn)
            .await?)
    }
}

fn trending_condition() -> Condition {
    Condition::all().add(
        Expr::col(drama_series::Column::ViewCount)
            .gte(Expr::col(drama_series::Column::TrendingThreshold)),
    )
}

fn featured_condition(today: NaiveDate) -> Condition {
    Condition::all()
        .add(drama_series::Column::IsFeatured.eq(true))
        .add(drama_series::Column::FeaturedUntil.gte(today))
}
