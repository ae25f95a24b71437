use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "episodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique together with `episode_number`
    pub season_id: i32,

    pub episode_number: i32,

    pub title: String,

    pub description: Option<String>,

    pub release_date: Option<Date>,

    pub duration_secs: Option<i64>,

    /// Delivery URL of the video
    pub video_file: Option<String>,

    /// Object name of the uploaded video
    pub video_file_name: Option<String>,

    pub is_free: bool,

    pub view_count: i64,

    /// Inactive episodes are hidden from the public API
    pub is_active: bool,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seasons::Entity",
        from = "Column::SeasonId",
        to = "super::seasons::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Seasons,
    #[sea_orm(has_many = "super::episode_watch_progress::Entity")]
    EpisodeWatchProgress,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::episode_watch_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EpisodeWatchProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
