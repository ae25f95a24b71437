use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tokio::task;

use super::{Page, fetch_page, timestamp};
use crate::config::SecurityConfig;
use crate::domain::{PageRequest, UserType};
use crate::entities::{users, wallets};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub api_key: String,
    pub user_type: UserType,
    pub is_active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            api_key: model.api_key,
            user_type: model.user_type.parse().unwrap_or_default(),
            is_active: model.is_active,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            phone_number: model.phone_number,
            address: model.address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub user_type: UserType,
}

/// Fields an admin or the user may change. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
    pub user_type: Option<UserType>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<users::Model>> {
        users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(login))
                    .add(users::Column::Username.eq(login)),
            )
            .one(&self.conn)
            .await
            .context("Failed to query user by login")
    }

    /// Returns the user when `password` matches. Inactive accounts are returned
    /// too; the caller decides how to treat them.
    pub async fn verify_password(&self, login: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_by_login(login).await? else {
            return Ok(None);
        };

        if verify_hash(user.password_hash.clone(), password).await? {
            Ok(Some(User::from(user)))
        } else {
            Ok(None)
        }
    }

    pub async fn verify_password_for_id(&self, id: i32, password: &str) -> Result<bool> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        match user {
            Some(user) => verify_hash(user.password_hash, password).await,
            None => Ok(false),
        }
    }

    /// Creates the user together with an empty wallet.
    pub async fn create(&self, new_user: NewUser, security: &SecurityConfig) -> Result<User> {
        let password = new_user.password;
        let config = security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let now = timestamp();
        let txn = self.conn.begin().await?;

        let user = users::ActiveModel {
            email: Set(new_user.email),
            username: Set(new_user.username),
            password_hash: Set(password_hash),
            api_key: Set(generate_api_key()),
            user_type: Set(new_user.user_type.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        wallets::ActiveModel {
            user_id: Set(user.id),
            total_coins: Set(0),
            used_coins: Set(0),
            available_coins: Set(0),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(User::from(user))
    }

    pub async fn update_password(
        &self,
        id: i32,
        new_password: &str,
        security: &SecurityConfig,
    ) -> Result<()> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for password update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let password = new_password.to_string();
        let config = security.clone();
        let new_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(new_hash);
        active.updated_at = Set(timestamp());
        active.update(&self.conn).await?;

        Ok(())
    }

    /// Verify API key and return the associated user
    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::ApiKey.eq(api_key))
            .one(&self.conn)
            .await
            .context("Failed to query user by API key")?;

        Ok(user.map(User::from))
    }

    pub async fn regenerate_api_key(&self, id: i32) -> Result<String> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for API key regeneration")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let new_api_key = generate_api_key();

        let mut active: users::ActiveModel = user.into();
        active.api_key = Set(new_api_key.clone());
        active.updated_at = Set(timestamp());
        active.update(&self.conn).await?;

        Ok(new_api_key)
    }

    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>> {
        let Some(user) = users::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(Some(last_name));
        }
        if let Some(bio) = changes.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(Some(phone_number));
        }
        if let Some(address) = changes.address {
            active.address = Set(Some(address));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(user_type) = changes.user_type {
            active.user_type = Set(user_type.as_str().to_string());
        }
        active.updated_at = Set(timestamp());

        let updated = active.update(&self.conn).await?;
        Ok(Some(User::from(updated)))
    }

    /// Deletes the user. Reviews, likes, progress and the wallet go with it.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let Some(user) = users::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let result = user.delete(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list(&self, search: Option<&str>, page: PageRequest) -> Result<Page<User>> {
        let mut query = users::Entity::find().order_by_asc(users::Column::Id);

        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(users::Column::Username.contains(term))
                    .add(users::Column::Email.contains(term))
                    .add(users::Column::FirstName.contains(term))
                    .add(users::Column::LastName.contains(term)),
            );
        }

        let page = fetch_page(&self.conn, query, page).await?;
        Ok(page.map(User::from))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(users::Entity::find().count(&self.conn).await?)
    }
}

/// Runs Argon2 verification off the async runtime.
async fn verify_hash(password_hash: String, password: &str) -> Result<bool> {
    let password = password.to_string();

    task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

        Ok::<bool, anyhow::Error>(
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await
    .context("Password verification task panicked")?
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the argon2 crate defaults.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Generate a random API key (64 character hex string)
#[must_use]
pub fn generate_api_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_api_key_shape() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, generate_api_key());
    }

    #[test]
    fn test_hash_password_with_config() {
        let config = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        };
        let hash = hash_password("hunter22", Some(&config)).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"hunter22", &parsed)
                .is_ok()
        );
    }
}
