use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "directors")]
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
    #[sea_orm(has_many = "super::drama_series::Entity")]
    DramaSeries,
}

impl Related<super::drama_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DramaSeries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
