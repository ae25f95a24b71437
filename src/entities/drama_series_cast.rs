use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "drama_series_cast")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub series_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub actor_id: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drama_series::Entity",
        from = "Column::SeriesId",
        to = "super::drama_series::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DramaSeries,
    #[sea_orm(
        belongs_to = "super::actors::Entity",
        from = "Column::ActorId",
        to = "super::actors::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Actors,
}

impl Related<super::drama_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaSeries.def()
    }
}

impl Related<super::actors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
