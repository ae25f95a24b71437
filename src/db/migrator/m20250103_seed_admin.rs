use crate::db::repositories::timestamp;
use crate::db::repositories::user::hash_password;
use crate::domain::UserType;
use crate::entities::{users, wallets};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Default API key of the bootstrap admin (regenerate it after first login)
pub const DEFAULT_API_KEY: &str = "dramabox_default_api_key_please_regenerate";

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(DEFAULT_ADMIN_EMAIL))
            .one(db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let password_hash =
            hash_password("password", None).map_err(|e| DbErr::Custom(e.to_string()))?;
        let now = timestamp();

        let admin = users::ActiveModel {
            email: Set(DEFAULT_ADMIN_EMAIL.to_string()),
            username: Set("admin".to_string()),
            password_hash: Set(password_hash),
            api_key: Set(DEFAULT_API_KEY.to_string()),
            user_type: Set(UserType::Admin.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        wallets::ActiveModel {
            user_id: Set(admin.id),
            total_coins: Set(0),
            used_coins: Set(0),
            available_coins: Set(0),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        users::Entity::delete_many()
            .filter(users::Column::ApiKey.eq(DEFAULT_API_KEY))
            .exec(db)
            .await?;

        Ok(())
    }
}
