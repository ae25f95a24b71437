use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::services::{
    AuthService, CatalogService, ContentService, EngagementService, LookupService, WalletService,
};
use crate::state::SharedState;

mod admin;
pub mod auth;
mod catalog;
mod engagement;
mod error;
mod lookups;
mod observability;
mod system;
pub mod types;
mod validation;
mod wallet;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn catalog_service(&self) -> &Arc<dyn CatalogService + Send + Sync + 'static> {
        &self.shared.catalog_service
    }

    #[must_use]
    pub fn content_service(&self) -> &Arc<dyn ContentService + Send + Sync + 'static> {
        &self.shared.content_service
    }

    #[must_use]
    pub fn lookup_service(&self) -> &Arc<dyn LookupService + Send + Sync + 'static> {
        &self.shared.lookup_service
    }

    #[must_use]
    pub fn engagement_service(&self) -> &Arc<dyn EngagementService + Send + Sync + 'static> {
        &self.shared.engagement_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService + Send + Sync + 'static> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn wallet_service(&self) -> &Arc<dyn WalletService + Send + Sync + 'static> {
        &self.shared.wallet_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, inactivity_minutes) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_inactivity_minutes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            inactivity_minutes,
        )));

    let api_router = Router::new()
        .nest("/v1", public_router())
        .nest("/auth", auth_router())
        .nest("/admin", admin::router())
        .nest("/system", system_router())
        .layer(middleware::from_fn_with_state(state.clone(), auth::identify))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(catalog::home))
        .route("/dramas", get(catalog::list_dramas))
        .route("/dramas/{key}", get(catalog::get_drama))
        .route("/dramas/{key}/seasons", get(catalog::drama_seasons))
        .route("/dramas/{key}/reviews", get(engagement::list_reviews))
        .route("/episodes/{id}", get(catalog::get_episode))
        .route("/lookups", get(lookups::all))
        .route("/categories", get(lookups::categories))
        .route("/tags", get(lookups::tags))
        .route("/languages", get(lookups::languages))
        .route("/content-ratings", get(lookups::content_ratings))
        .route("/reviews", post(engagement::create_review))
        .route(
            "/reviews/{id}",
            put(engagement::update_review).delete(engagement::delete_review),
        )
        .route(
            "/likes",
            get(engagement::list_likes).post(engagement::toggle_like),
        )
        .route(
            "/progress",
            get(engagement::list_progress).post(engagement::record_progress),
        )
        .route("/wallet", get(wallet::get_wallet))
}

fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me).put(auth::update_me))
        .route("/password", put(auth::change_password))
        .route("/api-key", get(auth::get_api_key))
        .route("/api-key/regenerate", post(auth::regenerate_api_key))
        .route("/deactivate", post(auth::deactivate))
        .route("/account", axum::routing::delete(auth::delete_account))
}

fn system_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health/live", get(system::health_live))
        .route("/health/ready", get(system::health_ready))
        .route("/status", get(system::get_status))
        .route("/metrics", get(system::get_metrics))
}
