use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "languages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    /// Short code such as "en" or "ko"
    #[sea_orm(unique)]
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drama_series_languages::Entity")]
    DramaSeriesLanguages,
}

impl Related<super::drama_series_languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaSeriesLanguages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
