use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drama_series_tags::Entity")]
    DramaSeriesTags,
}

impl Related<super::drama_series_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaSeriesTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
