pub use super::actors::Entity as Actors;
pub use super::categories::Entity as Categories;
pub use super::content_ratings::Entity as ContentRatings;
pub use super::directors::Entity as Directors;
pub use super::drama_series::Entity as DramaSeries;
pub use super::drama_series_cast::Entity as DramaSeriesCast;
pub use super::drama_series_categories::Entity as DramaSeriesCategories;
pub use super::drama_series_languages::Entity as DramaSeriesLanguages;
pub use super::drama_series_tags::Entity as DramaSeriesTags;
pub use super::episode_watch_progress::Entity as EpisodeWatchProgress;
pub use super::episodes::Entity as Episodes;
pub use super::languages::Entity as Languages;
pub use super::likes::Entity as Likes;
pub use super::reviews::Entity as Reviews;
pub use super::seasons::Entity as Seasons;
pub use super::tags::Entity as Tags;
pub use super::users::Entity as Users;
pub use super::wallets::Entity as Wallets;
