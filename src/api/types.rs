use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{Page, Person, User};
use crate::domain::{self, UserType};
use crate::entities::{
    categories, content_ratings, drama_series, episode_watch_progress, episodes, languages,
    seasons, tags, wallets,
};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Page of results with the totals a client needs to paginate.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let page = page.map(f);
        Self {
            count: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            results: page.items,
        }
    }
}

/// `?page=&page_size=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentRatingDto {
    pub id: i32,
    pub code: String,
    pub description: Option<String>,
}

impl From<content_ratings::Model> for ContentRatingDto {
    fn from(model: content_ratings::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            description: model.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

impl From<categories::Model> for CategoryDto {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            thumbnail: model.thumbnail,
            description: model.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<tags::Model> for TagDto {
    fn from(model: tags::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageDto {
    pub id: i32,
    pub name: String,
    pub code: String,
}

impl From<languages::Model> for LanguageDto {
    fn from(model: languages::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
        }
    }
}

/// Actor or director.
#[derive(Debug, Clone, Serialize)]
pub struct PersonDto {
    pub id: i32,
    pub name: String,
    pub profile_image: Option<String>,
    pub biography: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            profile_image: person.profile_image,
            biography: person.biography,
            date_of_birth: person.date_of_birth,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupsDto {
    pub categories: Vec<CategoryDto>,
    pub tags: Vec<TagDto>,
    pub languages: Vec<LanguageDto>,
    pub content_ratings: Vec<ContentRatingDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummaryDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub rating: f64,
    pub poster_image: Option<String>,
    pub trailer_url: Option<String>,
    pub director_id: Option<i32>,
    pub content_rating_id: Option<i32>,
    pub view_count: i64,
    pub search_count: i64,
    pub is_featured: bool,
    pub featured_until: Option<NaiveDate>,
    pub trending_threshold: i64,
    pub is_trending: bool,
    pub is_currently_featured: bool,
    pub is_upcoming: bool,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub languages: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl SeriesSummaryDto {
    /// Derived flags are evaluated against `today`; link names start empty.
    #[must_use]
    pub fn from_model(model: drama_series::Model, today: NaiveDate) -> Self {
        Self {
            is_trending: domain::is_trending(model.view_count, model.trending_threshold),
            is_currently_featured: domain::is_currently_featured(
                model.is_featured,
                model.featured_until,
                today,
            ),
            is_upcoming: domain::is_upcoming(model.release_date, today),
            id: model.id,
            title: model.title,
            slug: model.slug,
            description: model.description,
            release_date: model.release_date,
            rating: model.rating,
            poster_image: model.poster_image,
            trailer_url: model.trailer_url,
            director_id: model.director_id,
            content_rating_id: model.content_rating_id,
            view_count: model.view_count,
            search_count: model.search_count,
            is_featured: model.is_featured,
            featured_until: model.featured_until,
            trending_threshold: model.trending_threshold,
            categories: Vec::new(),
            tags: Vec::new(),
            languages: Vec::new(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeriesDetailDto {
    #[serde(flatten)]
    pub series: SeriesSummaryDto,
    pub director: Option<PersonDto>,
    pub content_rating: Option<ContentRatingDto>,
    pub cast: Vec<PersonDto>,
    pub seasons: Vec<SeasonDto>,
    pub total_episodes: u64,
    pub like_count: u64,
    pub review_count: u64,
    pub average_review_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonDto {
    pub id: i32,
    pub series_id: i32,
    pub season_number: i32,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub episodes: Vec<EpisodeDto>,
    pub created_at: String,
}

impl SeasonDto {
    #[must_use]
    pub fn new(model: seasons::Model, episodes: Vec<EpisodeDto>) -> Self {
        Self {
            id: model.id,
            series_id: model.series_id,
            season_number: model.season_number,
            release_date: model.release_date,
            description: model.description,
            episodes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeDto {
    pub id: i32,
    pub season_id: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// `hh:mm:ss`
    pub duration: Option<String>,
    pub video_file: Option<String>,
    pub video_file_name: Option<String>,
    pub is_free: bool,
    pub view_count: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<episodes::Model> for EpisodeDto {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: model.id,
            season_id: model.season_id,
            episode_number: model.episode_number,
            title: model.title,
            description: model.description,
            release_date: model.release_date,
            duration: model.duration_secs.map(domain::format_duration),
            video_file: model.video_file,
            video_file_name: model.video_file_name,
            is_free: model.is_free,
            view_count: model.view_count,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContinueWatchingDto {
    pub series_id: i32,
    pub series_title: String,
    pub series_slug: String,
    pub season_number: i32,
    pub episode: EpisodeDto,
    pub position_secs: i64,
    pub completed: bool,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct HomeDto {
    pub featured_dramas: Vec<SeriesSummaryDto>,
    pub trending_dramas: Vec<SeriesSummaryDto>,
    pub upcoming_dramas: Vec<SeriesSummaryDto>,
    pub new_dramas: Vec<SeriesSummaryDto>,
    pub top_ten: Vec<SeriesSummaryDto>,
    pub most_popular: Vec<SeriesSummaryDto>,
    pub continue_watching: Vec<ContinueWatchingDto>,
    pub you_might_like: Vec<SeriesSummaryDto>,
}

#[derive(Debug, Serialize)]
pub struct ReviewDto {
    pub id: i32,
    pub user_id: i32,
    pub username: Option<String>,
    pub series_id: i32,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct LikeToggleDto {
    pub series_id: i32,
    pub liked: bool,
    pub like_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ProgressDto {
    pub episode_id: i32,
    pub position_secs: i64,
    pub completed: bool,
    pub updated_at: String,
}

impl From<episode_watch_progress::Model> for ProgressDto {
    fn from(model: episode_watch_progress::Model) -> Self {
        Self {
            episode_id: model.episode_id,
            position_secs: model.position_secs,
            completed: model.completed,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WalletDto {
    pub user_id: i32,
    pub total_coins: i64,
    pub used_coins: i64,
    pub available_coins: i64,
    pub updated_at: String,
}

impl From<wallets::Model> for WalletDto {
    fn from(model: wallets::Model) -> Self {
        Self {
            user_id: model.user_id,
            total_coins: model.total_coins,
            used_coins: model.used_coins,
            available_coins: model.available_coins,
            updated_at: model.updated_at,
        }
    }
}

/// Account as shown to its owner and to staff. Never carries the password hash or API key.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub user_type: UserType,
    pub is_active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            user_type: user.user_type,
            is_active: user.is_active,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            phone_number: user.phone_number,
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardDto {
    pub users: u64,
    pub series: u64,
    pub seasons: u64,
    pub episodes: u64,
    pub reviews: u64,
    pub likes: u64,
    pub featured_series: u64,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub series: u64,
    pub episodes: u64,
    pub users: u64,
}
