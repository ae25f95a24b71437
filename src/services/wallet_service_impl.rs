//! `SeaORM` implementation of the `WalletService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::api::types::WalletDto;
use crate::db::{CreditOutcome, DebitOutcome, Store};
use crate::services::wallet_service::{WalletError, WalletService};

pub struct SeaOrmWalletService {
    store: Store,
}

const fn positive(coins: i64) -> Result<i64, WalletError> {
    if coins <= 0 {
        return Err(WalletError::InvalidAmount(coins));
    }
    Ok(coins)
}

impl SeaOrmWalletService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn ensure_user(&self, user_id: i32) -> Result<(), WalletError> {
        if self.store.users().get_by_id(user_id).await?.is_none() {
            return Err(WalletError::UserNotFound(user_id));
        }
        Ok(())
    }
}

#[async_trait]
impl WalletService for SeaOrmWalletService {
    async fn get_wallet(&self, user_id: i32) -> Result<WalletDto, WalletError> {
        self.ensure_user(user_id).await?;
        let wallet = self.store.wallets().get_or_create(user_id).await?;
        Ok(WalletDto::from(wallet))
    }

    async fn credit(&self, user_id: i32, coins: i64) -> Result<WalletDto, WalletError> {
        let coins = positive(coins)?;
        self.ensure_user(user_id).await?;

        match self.store.wallets().credit(user_id, coins).await? {
            CreditOutcome::Applied(wallet) => {
                info!(user_id, coins, available = wallet.available_coins, "Wallet credited");
                Ok(WalletDto::from(wallet))
            }
            CreditOutcome::Overflow(wallet) => Err(WalletError::BalanceOverflow {
                total: wallet.total_coins,
                requested: coins,
            }),
        }
    }

    async fn debit(&self, user_id: i32, coins: i64) -> Result<WalletDto, WalletError> {
        let coins = positive(coins)?;
        self.ensure_user(user_id).await?;

        match self.store.wallets().debit(user_id, coins).await? {
            DebitOutcome::Applied(wallet) => {
                info!(user_id, coins, available = wallet.available_coins, "Wallet debited");
                Ok(WalletDto::from(wallet))
            }
            DebitOutcome::Insufficient(wallet) => Err(WalletError::InsufficientFunds {
                available: wallet.available_coins,
                requested: coins,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amounts_only() {
        assert_eq!(positive(5).unwrap(), 5);
        assert!(matches!(positive(0), Err(WalletError::InvalidAmount(0))));
        assert!(matches!(positive(-3), Err(WalletError::InvalidAmount(-3))));
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = WalletError::InsufficientFunds {
            available: 5,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient coins: 5 available, 10 requested"
        );
    }
}
