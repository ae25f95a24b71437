use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub thumbnail: Option<String>,

    pub description: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drama_series_categories::Entity")]
    DramaSeriesCategories,
}

impl Related<super::drama_series_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaSeriesCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
