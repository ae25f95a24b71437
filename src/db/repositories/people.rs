use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{Page, fetch_page};
use crate::domain::PageRequest;
use crate::entities::{actors, directors, prelude::*};
use crate::models::catalog::{PersonInput, PersonKind};

/// Actors and directors share one row shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub profile_image: Option<String>,
    pub biography: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<actors::Model> for Person {
    fn from(model: actors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            profile_image: model.profile_image,
            biography: model.biography,
            date_of_birth: model.date_of_birth,
        }
    }
}

impl From<directors::Model> for Person {
    fn from(model: directors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            profile_image: model.profile_image,
            biography: model.biography,
            date_of_birth: model.date_of_birth,
        }
    }
}

pub struct PeopleRepository {
    conn: DatabaseConnection,
}

impl PeopleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(
        &self,
        kind: PersonKind,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Person>> {
        let name = name.map(str::trim).filter(|s| !s.is_empty());

        match kind {
            PersonKind::Actor => {
                let mut query = Actors::find().order_by_asc(actors::Column::Name);
                if let Some(name) = name {
                    query = query.filter(actors::Column::Name.contains(name));
                }
                Ok(fetch_page(&self.conn, query, page).await?.map(Person::from))
            }
            PersonKind::Director => {
                let mut query = Directors::find().order_by_asc(directors::Column::Name);
                if let Some(name) = name {
                    query = query.filter(directors::Column::Name.contains(name));
                }
                Ok(fetch_page(&self.conn, query, page).await?.map(Person::from))
            }
        }
    }

    pub async fn get(&self, kind: PersonKind, id: i32) -> Result<Option<Person>> {
        let person = match kind {
            PersonKind::Actor => Actors::find_by_id(id)
                .one(&self.conn)
                .await?
                .map(Person::from),
            PersonKind::Director => Directors::find_by_id(id)
                .one(&self.conn)
                .await?
                .map(Person::from),
        };
        Ok(person)
    }

    pub async fn create(&self, kind: PersonKind, input: PersonInput) -> Result<Person> {
        let person = match kind {
            PersonKind::Actor => actors::ActiveModel {
                name: Set(input.name),
                profile_image: Set(input.profile_image),
                biography: Set(input.biography),
                date_of_birth: Set(input.date_of_birth),
                ..Default::default()
            }
            .insert(&self.conn)
            .await?
            .into(),
            PersonKind::Director => directors::ActiveModel {
                name: Set(input.name),
                profile_image: Set(input.profile_image),
                biography: Set(input.biography),
                date_of_birth: Set(input.date_of_birth),
                ..Default::default()
            }
            .insert(&self.conn)
            .await?
            .into(),
        };
        Ok(person)
    }

    pub async fn update(
        &self,
        kind: PersonKind,
        id: i32,
        input: PersonInput,
    ) -> Result<Option<Person>> {
        match kind {
            PersonKind::Actor => {
                let Some(existing) = Actors::find_by_id(id).one(&self.conn).await? else {
                    return Ok(None);
                };
                let mut active: actors::ActiveModel = existing.into();
                active.name = Set(input.name);
                active.profile_image = Set(input.profile_image);
                active.biography = Set(input.biography);
                active.date_of_birth = Set(input.date_of_birth);
                Ok(Some(active.update(&self.conn).await?.into()))
            }
            PersonKind::Director => {
                let Some(existing) = Directors::find_by_id(id).one(&self.conn).await? else {
                    return Ok(None);
                };
                let mut active: directors::ActiveModel = existing.into();
                active.name = Set(input.name);
                active.profile_image = Set(input.profile_image);
                active.biography = Set(input.biography);
                active.date_of_birth = Set(input.date_of_birth);
                Ok(Some(active.update(&self.conn).await?.into()))
            }
        }
    }

    pub async fn delete(&self, kind: PersonKind, id: i32) -> Result<bool> {
        let result = match kind {
            PersonKind::Actor => Actors::delete_by_id(id).exec(&self.conn).await?,
            PersonKind::Director => Directors::delete_by_id(id).exec(&self.conn).await?,
        };
        Ok(result.rows_affected > 0)
    }
}
