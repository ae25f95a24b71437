use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub series_id: i32,
    pub rating: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeInput {
    pub series_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressInput {
    pub episode_id: i32,
    pub position_secs: i64,
    /// Defaults to whether the position reached the episode duration
    pub completed: Option<bool>,
}
