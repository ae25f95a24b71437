use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Rating code such as "PG-13"
    #[sea_orm(unique)]
    pub code: String,

    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drama_series::Entity")]
    DramaSeries,
}

impl Related<super::drama_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaSeries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
