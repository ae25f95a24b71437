//! Coin balances. `available_coins` never goes negative and always equals
//! `total_coins - used_coins`.

use thiserror::Error;

use crate::api::types::WalletDto;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Coin amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("Crediting {requested} coins would exceed the wallet limit ({total} held)")]
    BalanceOverflow { total: i64, requested: i64 },

    #[error("Insufficient coins: {available} available, {requested} requested")]
    InsufficientFunds { available: i64, requested: i64 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for WalletError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for WalletError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait WalletService: Send + Sync {
    /// Creates the wallet with zero balances on first access.
    async fn get_wallet(&self, user_id: i32) -> Result<WalletDto, WalletError>;

    async fn credit(&self, user_id: i32, coins: i64) -> Result<WalletDto, WalletError>;

    /// # Errors
    ///
    /// Returns [`WalletError::InsufficientFunds`] when fewer than `coins` are available.
    async fn debit(&self, user_id: i32, coins: i64) -> Result<WalletDto, WalletError>;
}
