use sea_orm::entity::prelude::*;

/// An actor credited in the cast of a series.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub profile_image: Option<String>,

    pub biography: Option<String>,

    pub date_of_birth: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::drama_series_cast::Entity")]
    DramaSeriesCast,
}

impl Related<super::drama_series_cast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaSeriesCast.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
