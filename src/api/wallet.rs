use axum::{Json, extract::State};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, WalletDto};
use crate::services::WalletError;

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::UserNotFound(id) => Self::not_found("User", id),
            err @ WalletError::InvalidAmount(_) => Self::validation(err.to_string()),
            err @ (WalletError::InsufficientFunds { .. } | WalletError::BalanceOverflow { .. }) => {
                Self::Conflict(err.to_string())
            }
            WalletError::Database(msg) => Self::DatabaseError(msg),
            WalletError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /v1/wallet
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<WalletDto>>, ApiError> {
    let wallet = state.wallet_service().get_wallet(user.id).await?;
    Ok(Json(ApiResponse::success(wallet)))
}
