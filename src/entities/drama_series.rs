use sea_orm::entity::prelude::*;

/// Root content entity. Trending and featured state are derived from the
/// counters and the featured window, never stored.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drama_series")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub description: String,

    pub release_date: Option<Date>,

    pub director_id: Option<i32>,

    pub content_rating_id: Option<i32>,

    /// 0.0 - 9.9, one decimal
    pub rating: f64,

    pub poster_image: Option<String>,

    pub trailer_url: Option<String>,

    #[sea_orm(unique)]
    pub slug: String,

    pub view_count: i64,

    pub search_count: i64,

    pub is_featured: bool,

    pub featured_until: Option<Date>,

    pub trending_threshold: i64,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::directors::Entity",
        from = "Column::DirectorId",
        to = "super::directors::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Directors,
    #[sea_orm(
        belongs_to = "super::content_ratings::Entity",
        from = "Column::ContentRatingId",
        to = "super::content_ratings::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ContentRatings,
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::likes::Entity")]
    Likes,
}

impl Related<super::directors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Directors.def()
    }
}

impl Related<super::content_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentRatings.def()
    }
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
