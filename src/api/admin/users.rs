//! Staff-side user administration and wallet bookkeeping.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::auth::MessageResponse;
use crate::api::validation::{filter_term, validate_id};
use crate::api::{ApiError, ApiResponse, AppState, PageQuery, Paginated, UserDto, WalletDto};
use crate::models::account::AdminUserUpdate;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Matches username, email, first or last name
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordReset {
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CoinAmount {
    pub coins: i64,
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserListQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Paginated<UserDto>>>, ApiError> {
    let users = state
        .auth_service()
        .list_users(filter_term(query.search), page)
        .await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /admin/users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_id(id, "user")?;
    let user = state.auth_service().get_user(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /admin/users/{id}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<AdminUserUpdate>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_id(id, "user")?;
    let user = state.auth_service().admin_update_user(id, payload).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /admin/users/{id}/password
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<PasswordReset>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id, "user")?;
    state
        .auth_service()
        .reset_password(id, &payload.new_password)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password reset",
    ))))
}

/// GET /admin/users/{id}/wallet
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<WalletDto>>, ApiError> {
    let id = validate_id(id, "user")?;
    let wallet = state.wallet_service().get_wallet(id).await?;
    Ok(Json(ApiResponse::success(wallet)))
}

/// POST /admin/users/{id}/wallet/credit
pub async fn credit_wallet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CoinAmount>,
) -> Result<Json<ApiResponse<WalletDto>>, ApiError> {
    let id = validate_id(id, "user")?;
    let wallet = state.wallet_service().credit(id, payload.coins).await?;
    Ok(Json(ApiResponse::success(wallet)))
}

/// POST /admin/users/{id}/wallet/debit
/// 409 when the balance does not cover the amount.
pub async fn debit_wallet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CoinAmount>,
) -> Result<Json<ApiResponse<WalletDto>>, ApiError> {
    let id = validate_id(id, "user")?;
    let wallet = state.wallet_service().debit(id, payload.coins).await?;
    Ok(Json(ApiResponse::success(wallet)))
}
