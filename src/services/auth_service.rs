//! Domain service for authentication and user management.
//!
//! Handles registration, login, password changes, API keys, account
//! self-service and the staff-side user administration.

use serde::Serialize;
use thiserror::Error;

use crate::api::types::{PageQuery, Paginated, UserDto};
use crate::db::User;
use crate::domain::UserType;
use crate::models::account::{AdminUserUpdate, ProfileUpdate, RegisterInput};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    Inactive,

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Login result containing the account and its API key.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: UserDto,
    pub api_key: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a regular account with a fresh API key and an empty wallet.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for malformed input or a taken email/username.
    async fn register(&self, input: RegisterInput) -> Result<LoginResult, AuthError>;

    /// Creates an account of any type. Used by the CLI.
    async fn create_user(
        &self,
        input: RegisterInput,
        user_type: UserType,
    ) -> Result<UserDto, AuthError>;

    /// Verifies credentials, `login` being the email or the username.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails and
    /// [`AuthError::Inactive`] for deactivated accounts.
    async fn login(&self, login: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves an API key to its active owner.
    async fn authenticate_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError>;

    /// Resolves a session user id to its active owner.
    async fn authenticate_session(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    async fn get_user(&self, user_id: i32) -> Result<UserDto, AuthError>;

    async fn update_profile(
        &self,
        user_id: i32,
        update: ProfileUpdate,
    ) -> Result<UserDto, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if current password is incorrect or new password invalid.
    async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    async fn get_api_key(&self, user_id: i32) -> Result<String, AuthError>;

    async fn regenerate_api_key(&self, user_id: i32) -> Result<String, AuthError>;

    /// Sets `is_active = false` after re-checking the password.
    async fn deactivate(&self, user_id: i32, password: &str) -> Result<(), AuthError>;

    /// Deletes the account and everything owned by it after re-checking the password.
    async fn delete_account(&self, user_id: i32, password: &str) -> Result<(), AuthError>;

    async fn list_users(
        &self,
        search: Option<String>,
        page: PageQuery,
    ) -> Result<Paginated<UserDto>, AuthError>;

    async fn admin_update_user(
        &self,
        user_id: i32,
        update: AdminUserUpdate,
    ) -> Result<UserDto, AuthError>;

    async fn reset_password(&self, user_id: i32, new_password: &str) -> Result<(), AuthError>;
}
