//! Back-office CRUD for the reference tables: categories, tags, languages,
//! content ratings, and the actor/director people tables.

use std::fmt;
use thiserror::Error;

use crate::api::types::{
    CategoryDto, ContentRatingDto, LanguageDto, PageQuery, Paginated, PersonDto, TagDto,
};
use crate::models::catalog::{
    CategoryInput, ContentRatingInput, LanguageInput, PersonInput, PersonKind, TagInput,
};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LookupError {
    #[must_use]
    pub const fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }
}

impl From<sea_orm::DbErr> for LookupError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LookupError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    async fn list_categories(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<CategoryDto>, LookupError>;

    async fn get_category(&self, id: i32) -> Result<CategoryDto, LookupError>;

    /// # Errors
    ///
    /// Returns [`LookupError::Validation`] when the name or slug is taken.
    async fn create_category(&self, input: CategoryInput) -> Result<CategoryDto, LookupError>;

    async fn update_category(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> Result<CategoryDto, LookupError>;

    async fn delete_category(&self, id: i32) -> Result<(), LookupError>;

    async fn list_tags(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<TagDto>, LookupError>;

    async fn get_tag(&self, id: i32) -> Result<TagDto, LookupError>;

    async fn create_tag(&self, input: TagInput) -> Result<TagDto, LookupError>;

    async fn update_tag(&self, id: i32, input: TagInput) -> Result<TagDto, LookupError>;

    async fn delete_tag(&self, id: i32) -> Result<(), LookupError>;

    async fn list_languages(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<LanguageDto>, LookupError>;

    async fn get_language(&self, id: i32) -> Result<LanguageDto, LookupError>;

    async fn create_language(&self, input: LanguageInput) -> Result<LanguageDto, LookupError>;

    async fn update_language(
        &self,
        id: i32,
        input: LanguageInput,
    ) -> Result<LanguageDto, LookupError>;

    async fn delete_language(&self, id: i32) -> Result<(), LookupError>;

    /// `name` filters on the rating code.
    async fn list_content_ratings(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<ContentRatingDto>, LookupError>;

    async fn get_content_rating(&self, id: i32) -> Result<ContentRatingDto, LookupError>;

    async fn create_content_rating(
        &self,
        input: ContentRatingInput,
    ) -> Result<ContentRatingDto, LookupError>;

    async fn update_content_rating(
        &self,
        id: i32,
        input: ContentRatingInput,
    ) -> Result<ContentRatingDto, LookupError>;

    async fn delete_content_rating(&self, id: i32) -> Result<(), LookupError>;

    async fn list_people(
        &self,
        kind: PersonKind,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<PersonDto>, LookupError>;

    async fn get_person(&self, kind: PersonKind, id: i32) -> Result<PersonDto, LookupError>;

    async fn create_person(
        &self,
        kind: PersonKind,
        input: PersonInput,
    ) -> Result<PersonDto, LookupError>;

    async fn update_person(
        &self,
        kind: PersonKind,
        id: i32,
        input: PersonInput,
    ) -> Result<PersonDto, LookupError>;

    async fn delete_person(&self, kind: PersonKind, id: i32) -> Result<(), LookupError>;
}
