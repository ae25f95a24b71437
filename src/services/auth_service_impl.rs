//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::api::types::{PageQuery, Paginated, UserDto};
use crate::config::Config;
use crate::db::{NewUser, Store, User, UserChanges, is_unique_violation};
use crate::domain::{PageRequest, UserType};
use crate::models::account::{AdminUserUpdate, ProfileUpdate, RegisterInput};
use crate::services::auth_service::{AuthError, AuthService, LoginResult};

pub struct SeaOrmAuthService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid || email.len() > 254 || email.contains(char::is_whitespace) {
        return Err(AuthError::Validation("A valid email address is required".to_string()));
    }
    Ok(email)
}

fn validate_username(username: &str) -> Result<String, AuthError> {
    let username = username.trim();
    if username.is_empty() || username.len() > 150 {
        return Err(AuthError::Validation(
            "Username must be between 1 and 150 characters".to_string(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
    {
        return Err(AuthError::Validation(
            "Username may only contain letters, digits and @ . + - _".to_string(),
        ));
    }
    Ok(username.to_string())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn storage_error(err: anyhow::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::Validation("A user with this email or username already exists".to_string())
    } else {
        AuthError::from(err)
    }
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn check_password_strength(&self, password: &str) -> Result<(), AuthError> {
        let min = self.config.read().await.security.min_password_length;
        if password.chars().count() < min {
            return Err(AuthError::Validation(format!(
                "Password must be at least {min} characters"
            )));
        }
        Ok(())
    }

    async fn require_user(&self, user_id: i32) -> Result<User, AuthError> {
        self.store
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id))
    }

    async fn confirm_password(&self, user_id: i32, password: &str) -> Result<(), AuthError> {
        if !self
            .store
            .users()
            .verify_password_for_id(user_id, password)
            .await?
        {
            return Err(AuthError::Validation("Password is incorrect".to_string()));
        }
        Ok(())
    }

    async fn apply_changes(&self, user_id: i32, changes: UserChanges) -> Result<UserDto, AuthError> {
        self.store
            .users()
            .update(user_id, changes)
            .await
            .map_err(storage_error)?
            .map(UserDto::from)
            .ok_or(AuthError::UserNotFound(user_id))
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, input: RegisterInput) -> Result<LoginResult, AuthError> {
        let user = self.create_user(input, UserType::User).await?;
        let api_key = self.get_api_key(user.id).await?;
        Ok(LoginResult { user, api_key })
    }

    async fn create_user(
        &self,
        input: RegisterInput,
        user_type: UserType,
    ) -> Result<UserDto, AuthError> {
        let email = validate_email(&input.email)?;
        let username = validate_username(&input.username)?;
        self.check_password_strength(&input.password).await?;

        let security = self.config.read().await.security.clone();
        let user = self
            .store
            .users()
            .create(
                NewUser {
                    email,
                    username,
                    password: input.password,
                    user_type,
                },
                &security,
            )
            .await
            .map_err(storage_error)?;

        info!(user_id = user.id, username = %user.username, %user_type, "User created");
        Ok(UserDto::from(user))
    }

    async fn login(&self, login: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .users()
            .verify_password(login.trim(), password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::Inactive);
        }

        let api_key = user.api_key.clone();
        Ok(LoginResult {
            user: UserDto::from(user),
            api_key,
        })
    }

    async fn authenticate_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError> {
        let user = self.store.users().verify_api_key(api_key).await?;
        Ok(user.filter(|u| u.is_active))
    }

    async fn authenticate_session(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        let user = self.store.users().get_by_id(user_id).await?;
        Ok(user.filter(|u| u.is_active))
    }

    async fn get_user(&self, user_id: i32) -> Result<UserDto, AuthError> {
        Ok(UserDto::from(self.require_user(user_id).await?))
    }

    async fn update_profile(
        &self,
        user_id: i32,
        update: ProfileUpdate,
    ) -> Result<UserDto, AuthError> {
        let changes = UserChanges {
            first_name: trimmed(update.first_name),
            last_name: trimmed(update.last_name),
            bio: trimmed(update.bio),
            phone_number: trimmed(update.phone_number),
            address: trimmed(update.address),
            ..Default::default()
        };
        self.apply_changes(user_id, changes).await
    }

    async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.check_password_strength(new_password).await?;

        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        if !self
            .store
            .users()
            .verify_password_for_id(user_id, current_password)
            .await?
        {
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        let security = self.config.read().await.security.clone();
        self.store
            .users()
            .update_password(user_id, new_password, &security)
            .await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    async fn get_api_key(&self, user_id: i32) -> Result<String, AuthError> {
        Ok(self.require_user(user_id).await?.api_key)
    }

    async fn regenerate_api_key(&self, user_id: i32) -> Result<String, AuthError> {
        self.require_user(user_id).await?;
        let api_key = self.store.users().regenerate_api_key(user_id).await?;
        info!(user_id, "API key regenerated");
        Ok(api_key)
    }

    async fn deactivate(&self, user_id: i32, password: &str) -> Result<(), AuthError> {
        self.confirm_password(user_id, password).await?;
        self.apply_changes(
            user_id,
            UserChanges {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;
        info!(user_id, "Account deactivated");
        Ok(())
    }

    async fn delete_account(&self, user_id: i32, password: &str) -> Result<(), AuthError> {
        self.confirm_password(user_id, password).await?;
        if !self.store.users().delete(user_id).await? {
            return Err(AuthError::UserNotFound(user_id));
        }
        info!(user_id, "Account deleted");
        Ok(())
    }

    async fn list_users(
        &self,
        search: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<UserDto>, AuthError> {
        let size = self.config.read().await.catalog.admin_large_page_size;
        let request = PageRequest::clamped(page.page, page.page_size, size, size);
        let page = self.store.users().list(search.as_deref(), request).await?;
        Ok(Paginated::from_page(page, UserDto::from))
    }

    async fn admin_update_user(
        &self,
        user_id: i32,
        update: AdminUserUpdate,
    ) -> Result<UserDto, AuthError> {
        let changes = UserChanges {
            email: update.email.as_deref().map(validate_email).transpose()?,
            username: update.username.as_deref().map(validate_username).transpose()?,
            first_name: trimmed(update.first_name),
            last_name: trimmed(update.last_name),
            bio: trimmed(update.bio),
            phone_number: trimmed(update.phone_number),
            address: trimmed(update.address),
            is_active: update.is_active,
            user_type: update.user_type,
        };
        self.apply_changes(user_id, changes).await
    }

    async fn reset_password(&self, user_id: i32, new_password: &str) -> Result<(), AuthError> {
        self.check_password_strength(new_password).await?;
        self.require_user(user_id).await?;

        let security = self.config.read().await.security.clone();
        self.store
            .users()
            .update_password(user_id, new_password, &security)
            .await?;

        info!(user_id, "Password reset by staff");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email("  Viewer@Example.COM ").unwrap(),
            "viewer@example.com"
        );
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username(" drama_fan ").unwrap(), "drama_fan");
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(151)).is_err());
    }
}
