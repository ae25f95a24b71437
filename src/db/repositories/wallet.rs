use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::timestamp;
use crate::entities::wallets;

pub enum CreditOutcome {
    Applied(wallets::Model),
    /// The balance would no longer fit in an `i64`.
    Overflow(wallets::Model),
}

pub enum DebitOutcome {
    Applied(wallets::Model),
    Insufficient(wallets::Model),
}

pub struct WalletRepository {
    conn: DatabaseConnection,
}

impl WalletRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<wallets::Model>> {
        wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query wallet")
    }

    /// Returns the user's wallet, creating an empty one on first access.
    pub async fn get_or_create(&self, user_id: i32) -> Result<wallets::Model> {
        if let Some(wallet) = self.get(user_id).await? {
            return Ok(wallet);
        }

        let active = wallets::ActiveModel {
            user_id: Set(user_id),
            total_coins: Set(0),
            used_coins: Set(0),
            available_coins: Set(0),
            updated_at: Set(timestamp()),
            ..Default::default()
        };

        wallets::Entity::insert(active)
            .on_conflict(
                OnConflict::column(wallets::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.get(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Wallet for user {user_id} vanished after insert"))
    }

    /// Adds coins with one conditional update; `total_coins` stays within `i64`.
    pub async fn credit(&self, user_id: i32, coins: i64) -> Result<CreditOutcome> {
        self.get_or_create(user_id).await?;

        let headroom = i64::MAX.saturating_sub(coins);
        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::TotalCoins,
                Expr::col(wallets::Column::TotalCoins).add(coins),
            )
            .col_expr(
                wallets::Column::AvailableCoins,
                Expr::col(wallets::Column::AvailableCoins).add(coins),
            )
            .col_expr(
                wallets::Column::UpdatedAt,
                Expr::value(timestamp()),
            )
            .filter(wallets::Column::UserId.eq(user_id))
            .filter(wallets::Column::TotalCoins.lte(headroom))
            .exec(&self.conn)
            .await?;

        let wallet = self.get_or_create(user_id).await?;
        if result.rows_affected == 0 {
            Ok(CreditOutcome::Overflow(wallet))
        } else {
            Ok(CreditOutcome::Applied(wallet))
        }
    }

    /// Spends coins with one conditional update; `available_coins` never drops below zero.
    pub async fn debit(&self, user_id: i32, coins: i64) -> Result<DebitOutcome> {
        self.get_or_create(user_id).await?;

        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::UsedCoins,
                Expr::col(wallets::Column::UsedCoins).add(coins),
            )
            .col_expr(
                wallets::Column::AvailableCoins,
                Expr::col(wallets::Column::AvailableCoins).sub(coins),
            )
            .col_expr(
                wallets::Column::UpdatedAt,
                Expr::value(timestamp()),
            )
            .filter(wallets::Column::UserId.eq(user_id))
            .filter(wallets::Column::AvailableCoins.gte(coins))
            .exec(&self.conn)
            .await?;

        let wallet = self.get_or_create(user_id).await?;
        if result.rows_affected == 0 {
            Ok(DebitOutcome::Insufficient(wallet))
        } else {
            Ok(DebitOutcome::Applied(wallet))
        }
    }
}
