//! Back-office CRUD for categories, tags, languages, content ratings,
//! actors and directors.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::auth::MessageResponse;
use crate::api::validation::{filter_term, validate_id};
use crate::api::{
    ApiError, ApiResponse, AppState, CategoryDto, ContentRatingDto, LanguageDto, PageQuery,
    Paginated, PersonDto, TagDto,
};
use crate::models::catalog::{
    CategoryInput, ContentRatingInput, LanguageInput, PersonInput, PersonKind, TagInput,
};
use crate::services::LookupError;

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound { resource, id } => Self::not_found(resource, id),
            LookupError::Validation(msg) => Self::validation(msg),
            LookupError::Database(msg) => Self::DatabaseError(msg),
            LookupError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `?name=` contains filter shared by every listing here.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

type ListResult<T> = Result<Json<ApiResponse<Paginated<T>>>, ApiError>;
type ItemResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
type DeleteResult = Result<Json<ApiResponse<MessageResponse>>, ApiError>;

fn deleted(resource: &str) -> Json<ApiResponse<MessageResponse>> {
    Json(ApiResponse::success(MessageResponse::new(format!(
        "{resource} deleted"
    ))))
}

// ============================================================================
// Categories
// ============================================================================

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
    Query(page): Query<PageQuery>,
) -> ListResult<CategoryDto> {
    let categories = state
        .lookup_service()
        .list_categories(filter_term(query.name), page)
        .await?;
    Ok(Json(ApiResponse::success(categories)))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategoryInput>,
) -> ItemResult<CategoryDto> {
    let category = state.lookup_service().create_category(payload).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ItemResult<CategoryDto> {
    let id = validate_id(id, "category")?;
    let category = state.lookup_service().get_category(id).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryInput>,
) -> ItemResult<CategoryDto> {
    let id = validate_id(id, "category")?;
    let category = state.lookup_service().update_category(id, payload).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> DeleteResult {
    let id = validate_id(id, "category")?;
    state.lookup_service().delete_category(id).await?;
    Ok(deleted("Category"))
}

// ============================================================================
// Tags
// ============================================================================

pub async fn list_tags(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
    Query(page): Query<PageQuery>,
) -> ListResult<TagDto> {
    let tags = state
        .lookup_service()
        .list_tags(filter_term(query.name), page)
        .await?;
    Ok(Json(ApiResponse::success(tags)))
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TagInput>,
) -> ItemResult<TagDto> {
    let tag = state.lookup_service().create_tag(payload).await?;
    Ok(Json(ApiResponse::success(tag)))
}

pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ItemResult<TagDto> {
    let id = validate_id(id, "tag")?;
    let tag = state.lookup_service().get_tag(id).await?;
    Ok(Json(ApiResponse::success(tag)))
}

pub async fn update_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<TagInput>,
) -> ItemResult<TagDto> {
    let id = validate_id(id, "tag")?;
    let tag = state.lookup_service().update_tag(id, payload).await?;
    Ok(Json(ApiResponse::success(tag)))
}

pub async fn delete_tag(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> DeleteResult {
    let id = validate_id(id, "tag")?;
    state.lookup_service().delete_tag(id).await?;
    Ok(deleted("Tag"))
}

// ============================================================================
// Languages
// ============================================================================

pub async fn list_languages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
    Query(page): Query<PageQuery>,
) -> ListResult<LanguageDto> {
    let languages = state
        .lookup_service()
        .list_languages(filter_term(query.name), page)
        .await?;
    Ok(Json(ApiResponse::success(languages)))
}

pub async fn create_language(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LanguageInput>,
) -> ItemResult<LanguageDto> {
    let language = state.lookup_service().create_language(payload).await?;
    Ok(Json(ApiResponse::success(language)))
}

pub async fn get_language(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ItemResult<LanguageDto> {
    let id = validate_id(id, "language")?;
    let language = state.lookup_service().get_language(id).await?;
    Ok(Json(ApiResponse::success(language)))
}

pub async fn update_language(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<LanguageInput>,
) -> ItemResult<LanguageDto> {
    let id = validate_id(id, "language")?;
    let language = state.lookup_service().update_language(id, payload).await?;
    Ok(Json(ApiResponse::success(language)))
}

pub async fn delete_language(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> DeleteResult {
    let id = validate_id(id, "language")?;
    state.lookup_service().delete_language(id).await?;
    Ok(deleted("Language"))
}

// ============================================================================
// Content ratings
// ============================================================================

pub async fn list_content_ratings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
    Query(page): Query<PageQuery>,
) -> ListResult<ContentRatingDto> {
    let ratings = state
        .lookup_service()
        .list_content_ratings(filter_term(query.name), page)
        .await?;
    Ok(Json(ApiResponse::success(ratings)))
}

pub async fn create_content_rating(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContentRatingInput>,
) -> ItemResult<ContentRatingDto> {
    let rating = state.lookup_service().create_content_rating(payload).await?;
    Ok(Json(ApiResponse::success(rating)))
}

pub async fn get_content_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ItemResult<ContentRatingDto> {
    let id = validate_id(id, "content rating")?;
    let rating = state.lookup_service().get_content_rating(id).await?;
    Ok(Json(ApiResponse::success(rating)))
}

pub async fn update_content_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ContentRatingInput>,
) -> ItemResult<ContentRatingDto> {
    let id = validate_id(id, "content rating")?;
    let rating = state
        .lookup_service()
        .update_content_rating(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(rating)))
}

pub async fn delete_content_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> DeleteResult {
    let id = validate_id(id, "content rating")?;
    state.lookup_service().delete_content_rating(id).await?;
    Ok(deleted("Content rating"))
}

// ============================================================================
// Actors and directors
// ============================================================================

async fn list_people(
    state: &AppState,
    kind: PersonKind,
    query: NameQuery,
    page: PageQuery,
) -> ListResult<PersonDto> {
    let people = state
        .lookup_service()
        .list_people(kind, filter_term(query.name), page)
        .await?;
    Ok(Json(ApiResponse::success(people)))
}

async fn create_person(state: &AppState, kind: PersonKind, input: PersonInput) -> ItemResult<PersonDto> {
    let person = state.lookup_service().create_person(kind, input).await?;
    Ok(Json(ApiResponse::success(person)))
}

async fn get_person(state: &AppState, kind: PersonKind, id: i32) -> ItemResult<PersonDto> {
    let id = validate_id(id, kind.label())?;
    let person = state.lookup_service().get_person(kind, id).await?;
    Ok(Json(ApiResponse::success(person)))
}

async fn update_person(
    state: &AppState,
    kind: PersonKind,
    id: i32,
    input: PersonInput,
) -> ItemResult<PersonDto> {
    let id = validate_id(id, kind.label())?;
    let person = state.lookup_service().update_person(kind, id, input).await?;
    Ok(Json(ApiResponse::success(person)))
}

async fn delete_person(state: &AppState, kind: PersonKind, id: i32) -> DeleteResult {
    let id = validate_id(id, kind.label())?;
    state.lookup_service().delete_person(kind, id).await?;
    Ok(deleted(kind.label()))
}

pub async fn list_actors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
    Query(page): Query<PageQuery>,
) -> ListResult<PersonDto> {
    list_people(&state, PersonKind::Actor, query, page).await
}

pub async fn create_actor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PersonInput>,
) -> ItemResult<PersonDto> {
    create_person(&state, PersonKind::Actor, payload).await
}

pub async fn get_actor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ItemResult<PersonDto> {
    get_person(&state, PersonKind::Actor, id).await
}

pub async fn update_actor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<PersonInput>,
) -> ItemResult<PersonDto> {
    update_person(&state, PersonKind::Actor, id, payload).await
}

pub async fn delete_actor(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> DeleteResult {
    delete_person(&state, PersonKind::Actor, id).await
}

pub async fn list_directors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
    Query(page): Query<PageQuery>,
) -> ListResult<PersonDto> {
    list_people(&state, PersonKind::Director, query, page).await
}

pub async fn create_director(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PersonInput>,
) -> ItemResult<PersonDto> {
    create_person(&state, PersonKind::Director, payload).await
}

pub async fn get_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ItemResult<PersonDto> {
    get_person(&state, PersonKind::Director, id).await
}

pub async fn update_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<PersonInput>,
) -> ItemResult<PersonDto> {
    update_person(&state, PersonKind::Director, id, payload).await
}

pub async fn delete_director(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> DeleteResult {
    delete_person(&state, PersonKind::Director, id).await
}
