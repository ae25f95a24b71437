use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    /// Derived from `name` when missing or blank
    pub slug: Option<String>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInput {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInput {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRatingInput {
    pub code: String,
    pub description: Option<String>,
}

/// Shared shape of actors and directors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    pub name: String,
    pub profile_image: Option<String>,
    pub biography: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonKind {
    Actor,
    Director,
}

impl PersonKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Actor => "Actor",
            Self::Director => "Director",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub director_id: Option<i32>,
    pub content_rating_id: Option<i32>,
    #[serde(default)]
    pub rating: f64,
    pub poster_image: Option<String>,
    pub trailer_url: Option<String>,
    /// Derived from `title` on create, kept as-is on update when missing
    pub slug: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub featured_until: Option<NaiveDate>,
    pub trending_threshold: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonInput {
    pub season_number: i32,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeInput {
    pub episode_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// `hh:mm:ss`
    pub duration: Option<String>,
    pub video_file: Option<String>,
    pub video_file_name: Option<String>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUpdate {
    pub video_file: String,
    pub video_file_name: Option<String>,
}

/// Which many-to-many set of a series is being replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Tags,
    Languages,
    Categories,
    Cast,
}

impl LinkKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tags => "tag",
            Self::Languages => "language",
            Self::Categories => "category",
            Self::Cast => "actor",
        }
    }
}

/// Query-string filters of the public series listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesFilter {
    pub search: Option<String>,
    /// Category name
    pub category: Option<String>,
    /// Tag name
    pub tag: Option<String>,
    pub is_popular: Option<bool>,
    pub is_trending: Option<bool>,
    pub is_featured: Option<bool>,
    pub new_release: Option<bool>,
    pub top_searched: Option<bool>,
}

impl SeriesFilter {
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
