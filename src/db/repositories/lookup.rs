use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{Page, fetch_page, timestamp};
use crate::domain::PageRequest;
use crate::entities::{categories, content_ratings, languages, prelude::*, tags};
use crate::models::catalog::{CategoryInput, ContentRatingInput, LanguageInput, TagInput};

/// Categories, tags, languages and content ratings.
pub struct LookupRepository {
    conn: DatabaseConnection,
}

fn name_filter(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|s| !s.is_empty())
}

impl LookupRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // Categories

    pub async fn all_categories(&self) -> Result<Vec<categories::Model>> {
        Ok(Categories::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_categories(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<categories::Model>> {
        let mut query = Categories::find().order_by_asc(categories::Column::Name);
        if let Some(name) = name_filter(name) {
            query = query.filter(categories::Column::Name.contains(name));
        }
        fetch_page(&self.conn, query, page).await
    }

    pub async fn get_category(&self, id: i32) -> Result<Option<categories::Model>> {
        Ok(Categories::find_by_id(id).one(&self.conn).await?)
    }

    /// `slug` is the resolved slug; `input.slug` is ignored.
    pub async fn create_category(&self, input: CategoryInput, slug: String) -> Result<categories::Model> {
        let model = categories::ActiveModel {
            name: Set(input.name),
            slug: Set(slug),
            thumbnail: Set(input.thumbnail),
            description: Set(input.description),
            created_at: Set(timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update_category(
        &self,
        id: i32,
        input: CategoryInput,
        slug: String,
    ) -> Result<Option<categories::Model>> {
        let Some(existing) = Categories::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.slug = Set(slug);
        active.thumbnail = Set(input.thumbnail);
        active.description = Set(input.description);
        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete_category(&self, id: i32) -> Result<bool> {
        let result = Categories::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    // Tags

    pub async fn all_tags(&self) -> Result<Vec<tags::Model>> {
        Ok(Tags::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_tags(&self, name: Option<&str>, page: PageRequest) -> Result<Page<tags::Model>> {
        let mut query = Tags::find().order_by_asc(tags::Column::Name);
        if let Some(name) = name_filter(name) {
            query = query.filter(tags::Column::Name.contains(name));
        }
        fetch_page(&self.conn, query, page).await
    }

    pub async fn get_tag(&self, id: i32) -> Result<Option<tags::Model>> {
        Ok(Tags::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn create_tag(&self, input: TagInput, slug: String) -> Result<tags::Model> {
        let model = tags::ActiveModel {
            name: Set(input.name),
            slug: Set(slug),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update_tag(
        &self,
        id: i32,
        input: TagInput,
        slug: String,
    ) -> Result<Option<tags::Model>> {
        let Some(existing) = Tags::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: tags::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.slug = Set(slug);
        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete_tag(&self, id: i32) -> Result<bool> {
        let result = Tags::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    // Languages

    pub async fn all_languages(&self) -> Result<Vec<languages::Model>> {
        Ok(Languages::find()
            .order_by_asc(languages::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_languages(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<languages::Model>> {
        let mut query = Languages::find().order_by_asc(languages::Column::Name);
        if let Some(name) = name_filter(name) {
            query = query.filter(languages::Column::Name.contains(name));
        }
        fetch_page(&self.conn, query, page).await
    }

    pub async fn get_language(&self, id: i32) -> Result<Option<languages::Model>> {
        Ok(Languages::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn create_language(&self, input: LanguageInput) -> Result<languages::Model> {
        let model = languages::ActiveModel {
            name: Set(input.name),
            code: Set(input.code),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update_language(
        &self,
        id: i32,
        input: LanguageInput,
    ) -> Result<Option<languages::Model>> {
        let Some(existing) = Languages::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: languages::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.code = Set(input.code);
        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete_language(&self, id: i32) -> Result<bool> {
        let result = Languages::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    // Content ratings

    pub async fn all_content_ratings(&self) -> Result<Vec<content_ratings::Model>> {
        Ok(ContentRatings::find()
            .order_by_asc(content_ratings::Column::Code)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_content_ratings(
        &self,
        code: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<content_ratings::Model>> {
        let mut query = ContentRatings::find().order_by_asc(content_ratings::Column::Code);
        if let Some(code) = name_filter(code) {
            query = query.filter(content_ratings::Column::Code.contains(code));
        }
        fetch_page(&self.conn, query, page).await
    }

    pub async fn get_content_rating(&self, id: i32) -> Result<Option<content_ratings::Model>> {
        Ok(ContentRatings::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn create_content_rating(
        &self,
        input: ContentRatingInput,
    ) -> Result<content_ratings::Model> {
        let model = content_ratings::ActiveModel {
            code: Set(input.code),
            description: Set(input.description),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update_content_rating(
        &self,
        id: i32,
        input: ContentRatingInput,
    ) -> Result<Option<content_ratings::Model>> {
        let Some(existing) = ContentRatings::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: content_ratings::ActiveModel = existing.into();
        active.code = Set(input.code);
        active.description = Set(input.description);
        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete_content_rating(&self, id: i32) -> Result<bool> {
        let result = ContentRatings::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
