//! `SeaORM` implementation of the `LookupService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::types::{
    CategoryDto, ContentRatingDto, LanguageDto, PageQuery, Paginated, PersonDto, TagDto,
};
use crate::config::Config;
use crate::db::{Store, is_unique_violation};
use crate::domain::{PageRequest, slugify};
use crate::models::catalog::{
    CategoryInput, ContentRatingInput, LanguageInput, PersonInput, PersonKind, TagInput,
};
use crate::services::lookup_service::{LookupError, LookupService};

pub struct SeaOrmLookupService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

/// Trimmed, non-empty and at most `max` characters.
fn required(value: &str, field: &str, max: usize) -> Result<String, LookupError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LookupError::validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(LookupError::validation(format!(
            "{field} must be {max} characters or less"
        )));
    }
    Ok(trimmed.to_string())
}

/// Explicit slug when given, otherwise derived from `name`.
fn resolve_slug(requested: Option<&str>, name: &str) -> Result<String, LookupError> {
    let source = requested
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(name);
    let slug = slugify(source);
    if slug.is_empty() {
        return Err(LookupError::validation(
            "Slug must contain letters or digits",
        ));
    }
    Ok(slug)
}

fn storage_error(err: anyhow::Error, resource: &str) -> LookupError {
    if is_unique_violation(&err) {
        LookupError::validation(format!("{resource} with this name already exists"))
    } else {
        LookupError::from(err)
    }
}

impl SeaOrmLookupService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn page_request(&self, page: PageQuery) -> PageRequest {
        let size = self.config.read().await.catalog.admin_page_size;
        PageRequest::clamped(page.page, page.page_size, size, size)
    }

    fn category_input(mut input: CategoryInput) -> Result<(CategoryInput, String), LookupError> {
        input.name = required(&input.name, "Name", 255)?;
        let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
        Ok((input, slug))
    }

    fn tag_input(mut input: TagInput) -> Result<(TagInput, String), LookupError> {
        input.name = required(&input.name, "Name", 50)?;
        let slug = resolve_slug(input.slug.as_deref(), &input.name)?;
        Ok((input, slug))
    }

    fn language_input(mut input: LanguageInput) -> Result<LanguageInput, LookupError> {
        input.name = required(&input.name, "Name", 100)?;
        input.code = required(&input.code, "Code", 10)?;
        Ok(input)
    }

    fn content_rating_input(
        mut input: ContentRatingInput,
    ) -> Result<ContentRatingInput, LookupError> {
        input.code = required(&input.code, "Code", 10)?;
        Ok(input)
    }

    fn person_input(mut input: PersonInput) -> Result<PersonInput, LookupError> {
        input.name = required(&input.name, "Name", 255)?;
        Ok(input)
    }
}

#[async_trait]
impl LookupService for SeaOrmLookupService {
    async fn list_categories(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<CategoryDto>, LookupError> {
        let request = self.page_request(page).await;
        let page = self
            .store
            .lookups()
            .list_categories(name.as_deref(), request)
            .await?;
        Ok(Paginated::from_page(page, CategoryDto::from))
    }

    async fn get_category(&self, id: i32) -> Result<CategoryDto, LookupError> {
        self.store
            .lookups()
            .get_category(id)
            .await?
            .map(CategoryDto::from)
            .ok_or_else(|| LookupError::not_found("Category", id))
    }

    async fn create_category(&self, input: CategoryInput) -> Result<CategoryDto, LookupError> {
        let (input, slug) = Self::category_input(input)?;
        let model = self
            .store
            .lookups()
            .create_category(input, slug)
            .await
            .map_err(|e| storage_error(e, "Category"))?;
        Ok(CategoryDto::from(model))
    }

    async fn update_category(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> Result<CategoryDto, LookupError> {
        let (input, slug) = Self::category_input(input)?;
        self.store
            .lookups()
            .update_category(id, input, slug)
            .await
            .map_err(|e| storage_error(e, "Category"))?
            .map(CategoryDto::from)
            .ok_or_else(|| LookupError::not_found("Category", id))
    }

    async fn delete_category(&self, id: i32) -> Result<(), LookupError> {
        if !self.store.lookups().delete_category(id).await? {
            return Err(LookupError::not_found("Category", id));
        }
        Ok(())
    }

    async fn list_tags(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<TagDto>, LookupError> {
        let request = self.page_request(page).await;
        let page = self.store.lookups().list_tags(name.as_deref(), request).await?;
        Ok(Paginated::from_page(page, TagDto::from))
    }

    async fn get_tag(&self, id: i32) -> Result<TagDto, LookupError> {
        self.store
            .lookups()
            .get_tag(id)
            .await?
            .map(TagDto::from)
            .ok_or_else(|| LookupError::not_found("Tag", id))
    }

    async fn create_tag(&self, input: TagInput) -> Result<TagDto, LookupError> {
        let (input, slug) = Self::tag_input(input)?;
        let model = self
            .store
            .lookups()
            .create_tag(input, slug)
            .await
            .map_err(|e| storage_error(e, "Tag"))?;
        Ok(TagDto::from(model))
    }

    async fn update_tag(&self, id: i32, input: TagInput) -> Result<TagDto, LookupError> {
        let (input, slug) = Self::tag_input(input)?;
        self.store
            .lookups()
            .update_tag(id, input, slug)
            .await
            .map_err(|e| storage_error(e, "Tag"))?
            .map(TagDto::from)
            .ok_or_else(|| LookupError::not_found("Tag", id))
    }

    async fn delete_tag(&self, id: i32) -> Result<(), LookupError> {
        if !self.store.lookups().delete_tag(id).await? {
            return Err(LookupError::not_found("Tag", id));
        }
        Ok(())
    }

    async fn list_languages(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<LanguageDto>, LookupError> {
        let request = self.page_request(page).await;
        let page = self
            .store
            .lookups()
            .list_languages(name.as_deref(), request)
            .await?;
        Ok(Paginated::from_page(page, LanguageDto::from))
    }

    async fn get_language(&self, id: i32) -> Result<LanguageDto, LookupError> {
        self.store
            .lookups()
            .get_language(id)
            .await?
            .map(LanguageDto::from)
            .ok_or_else(|| LookupError::not_found("Language", id))
    }

    async fn create_language(&self, input: LanguageInput) -> Result<LanguageDto, LookupError> {
        let input = Self::language_input(input)?;
        let model = self
            .store
            .lookups()
            .create_language(input)
            .await
            .map_err(|e| storage_error(e, "Language"))?;
        Ok(LanguageDto::from(model))
    }

    async fn update_language(
        &self,
        id: i32,
        input: LanguageInput,
    ) -> Result<LanguageDto, LookupError> {
        let input = Self::language_input(input)?;
        self.store
            .lookups()
            .update_language(id, input)
            .await
            .map_err(|e| storage_error(e, "Language"))?
            .map(LanguageDto::from)
            .ok_or_else(|| LookupError::not_found("Language", id))
    }

    async fn delete_language(&self, id: i32) -> Result<(), LookupError> {
        if !self.store.lookups().delete_language(id).await? {
            return Err(LookupError::not_found("Language", id));
        }
        Ok(())
    }

    async fn list_content_ratings(
        &self,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<ContentRatingDto>, LookupError> {
        let request = self.page_request(page).await;
        let page = self
            .store
            .lookups()
            .list_content_ratings(name.as_deref(), request)
            .await?;
        Ok(Paginated::from_page(page, ContentRatingDto::from))
    }

    async fn get_content_rating(&self, id: i32) -> Result<ContentRatingDto, LookupError> {
        self.store
            .lookups()
            .get_content_rating(id)
            .await?
            .map(ContentRatingDto::from)
            .ok_or_else(|| LookupError::not_found("Content rating", id))
    }

    async fn create_content_rating(
        &self,
        input: ContentRatingInput,
    ) -> Result<ContentRatingDto, LookupError> {
        let input = Self::content_rating_input(input)?;
        let model = self
            .store
            .lookups()
            .create_content_rating(input)
            .await
            .map_err(|e| storage_error(e, "Content rating"))?;
        Ok(ContentRatingDto::from(model))
    }

    async fn update_content_rating(
        &self,
        id: i32,
        input: ContentRatingInput,
    ) -> Result<ContentRatingDto, LookupError> {
        let input = Self::content_rating_input(input)?;
        self.store
            .lookups()
            .update_content_rating(id, input)
            .await
            .map_err(|e| storage_error(e, "Content rating"))?
            .map(ContentRatingDto::from)
            .ok_or_else(|| LookupError::not_found("Content rating", id))
    }

    async fn delete_content_rating(&self, id: i32) -> Result<(), LookupError> {
        if !self.store.lookups().delete_content_rating(id).await? {
            return Err(LookupError::not_found("Content rating", id));
        }
        Ok(())
    }

    async fn list_people(
        &self,
        kind: PersonKind,
        name: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<PersonDto>, LookupError> {
        let request = self.page_request(page).await;
        let page = self
            .store
            .people()
            .list(kind, name.as_deref(), request)
            .await?;
        Ok(Paginated::from_page(page, PersonDto::from))
    }

    async fn get_person(&self, kind: PersonKind, id: i32) -> Result<PersonDto, LookupError> {
        self.store
            .people()
            .get(kind, id)
            .await?
            .map(PersonDto::from)
            .ok_or_else(|| LookupError::not_found(kind.label(), id))
    }

    async fn create_person(
        &self,
        kind: PersonKind,
        input: PersonInput,
    ) -> Result<PersonDto, LookupError> {
        let input = Self::person_input(input)?;
        let person = self.store.people().create(kind, input).await?;
        Ok(PersonDto::from(person))
    }

    async fn update_person(
        &self,
        kind: PersonKind,
        id: i32,
        input: PersonInput,
    ) -> Result<PersonDto, LookupError> {
        let input = Self::person_input(input)?;
        self.store
            .people()
            .update(kind, id, input)
            .await?
            .map(PersonDto::from)
            .ok_or_else(|| LookupError::not_found(kind.label(), id))
    }

    async fn delete_person(&self, kind: PersonKind, id: i32) -> Result<(), LookupError> {
        if !self.store.people().delete(kind, id).await? {
            return Err(LookupError::not_found(kind.label(), id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_limits() {
        assert_eq!(required("  Romance ", "Name", 50).unwrap(), "Romance");
        assert!(required("   ", "Name", 50).is_err());
        assert!(required(&"x".repeat(51), "Name", 50).is_err());
    }

    #[test]
    fn test_resolve_slug_prefers_explicit_value() {
        assert_eq!(resolve_slug(None, "Slice of Life").unwrap(), "slice-of-life");
        assert_eq!(resolve_slug(Some("  "), "Thriller").unwrap(), "thriller");
        assert_eq!(resolve_slug(Some("K Drama"), "Korean").unwrap(), "k-drama");
        assert!(resolve_slug(None, "!!!").is_err());
    }
}
