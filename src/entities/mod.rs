pub mod prelude;

pub mod actors;
pub mod categories;
pub mod content_ratings;
pub mod directors;
pub mod drama_series;
pub mod drama_series_cast;
pub mod drama_series_categories;
pub mod drama_series_languages;
pub mod drama_series_tags;
pub mod episode_watch_progress;
pub mod episodes;
pub mod languages;
pub mod likes;
pub mod reviews;
pub mod seasons;
pub mod tags;
pub mod users;
pub mod wallets;
