use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::db::User;
use crate::domain::UserType;
use crate::models::account::{ProfileUpdate, RegisterInput};
use crate::services::{AuthError, LoginResult};

const SESSION_USER_KEY: &str = "user_id";

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                Self::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Inactive => Self::Unauthorized("Account is inactive".to_string()),
            AuthError::UserNotFound(id) => Self::not_found("User", id),
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Email or username
    pub login: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct PasswordConfirmation {
    pub password: String,
}

#[derive(Serialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

/// The authenticated caller, placed in request extensions by [`identify`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub user_type: UserType,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            user_type: user.user_type,
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}

/// Caller identity for routes that also serve anonymous visitors.
pub struct MaybeUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<CurrentUser>().cloned()))
    }
}

/// A signed-in admin.
pub struct Staff(pub CurrentUser);

impl<S> FromRequestParts<S> for Staff
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.user_type.is_staff() {
            return Err(ApiError::forbidden());
        }
        Ok(Self(user))
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the caller from:
/// 1. Session cookie (from login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
///
/// Unknown or inactive credentials leave the request anonymous; the
/// extractors decide whether a route needs a user.
pub async fn identify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = resolve_user(&state, &headers, &session).await {
        tracing::Span::current().record("user_id", user.id);
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Rejects anonymous callers with 401 and non-staff with 403.
pub async fn require_staff(_staff: Staff, request: Request, next: Next) -> Response {
    next.run(request).await
}

async fn resolve_user(
    state: &AppState,
    headers: &HeaderMap,
    session: &Session,
) -> Option<CurrentUser> {
    if let Ok(Some(user_id)) = session.get::<i32>(SESSION_USER_KEY).await {
        match state.auth_service().authenticate_session(user_id).await {
            Ok(Some(user)) => return Some(CurrentUser::from(user)),
            Ok(None) => {
                let _ = session.flush().await;
            }
            Err(e) => tracing::warn!(error = %e, "Session lookup failed"),
        }
    }

    let key = extract_api_key(headers)?;
    match state.auth_service().authenticate_api_key(&key).await {
        Ok(user) => user.map(CurrentUser::from),
        Err(e) => {
            tracing::warn!(error = %e, "API key lookup failed");
            None
        }
    }
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

async fn start_session(session: &Session, user_id: i32) -> Result<(), ApiError> {
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterInput>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    let result = state.auth_service().register(payload).await?;
    start_session(&session, result.user.id).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /auth/login
/// Authenticate with email or username and password, returns API key on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    if payload.login.trim().is_empty() {
        return Err(ApiError::validation("Email or username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth_service()
        .login(&payload.login, &payload.password)
        .await?;

    start_session(&session, result.user.id).await?;
    tracing::info!(user_id = result.user.id, "User logged in");

    Ok(Json(ApiResponse::success(result)))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    let _ = session.flush().await;
    Json(ApiResponse::success(MessageResponse::new("Logged out")))
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.auth_service().get_user(user.id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/me
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.auth_service().update_profile(user.id, payload).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/password
/// Change password (requires current password verification)
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service()
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password updated successfully",
    ))))
}

/// GET /auth/api-key
pub async fn get_api_key(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let api_key = state.auth_service().get_api_key(user.id).await?;
    Ok(Json(ApiResponse::success(ApiKeyResponse { api_key })))
}

/// POST /auth/api-key/regenerate
pub async fn regenerate_api_key(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let api_key = state.auth_service().regenerate_api_key(user.id).await?;
    Ok(Json(ApiResponse::success(ApiKeyResponse { api_key })))
}

/// POST /auth/deactivate
pub async fn deactivate(
    State(state): State<Arc<AppState>>,
    session: Session,
    user: CurrentUser,
    Json(payload): Json<PasswordConfirmation>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service()
        .deactivate(user.id, &payload.password)
        .await?;
    let _ = session.flush().await;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Account deactivated",
    ))))
}

/// DELETE /auth/account
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    session: Session,
    user: CurrentUser,
    Json(payload): Json<PasswordConfirmation>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service()
        .delete_account(user.id, &payload.password)
        .await?;
    let _ = session.flush().await;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Account deleted",
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_api_key_sources() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_api_key(&headers), None);

        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(extract_api_key(&headers), Some("abc123".to_string()));

        headers.insert("X-Api-Key", HeaderValue::from_static("from-header"));
        assert_eq!(extract_api_key(&headers), Some("from-header".to_string()));
    }

    #[test]
    fn test_non_bearer_authorization_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(extract_api_key(&headers), None);
    }
}
