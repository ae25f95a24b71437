use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, ContentService, EngagementService, LookupService,
    SeaOrmAuthService, SeaOrmCatalogService, SeaOrmContentService, SeaOrmEngagementService,
    SeaOrmLookupService, SeaOrmWalletService, WalletService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub catalog_service: Arc<dyn CatalogService + Send + Sync + 'static>,

    pub content_service: Arc<dyn ContentService + Send + Sync + 'static>,

    pub lookup_service: Arc<dyn LookupService + Send + Sync + 'static>,

    pub engagement_service: Arc<dyn EngagementService + Send + Sync + 'static>,

    pub auth_service: Arc<dyn AuthService + Send + Sync + 'static>,

    pub wallet_service: Arc<dyn WalletService + Send + Sync + 'static>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires every service around an already opened store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let config = Arc::new(RwLock::new(config));

        let catalog_service = Arc::new(SeaOrmCatalogService::new(store.clone(), config.clone()))
            as Arc<dyn CatalogService + Send + Sync + 'static>;

        let content_service = Arc::new(SeaOrmContentService::new(store.clone(), config.clone()))
            as Arc<dyn ContentService + Send + Sync + 'static>;

        let lookup_service = Arc::new(SeaOrmLookupService::new(store.clone(), config.clone()))
            as Arc<dyn LookupService + Send + Sync + 'static>;

        let engagement_service = Arc::new(SeaOrmEngagementService::new(store.clone()))
            as Arc<dyn EngagementService + Send + Sync + 'static>;

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), config.clone()))
            as Arc<dyn AuthService + Send + Sync + 'static>;

        let wallet_service = Arc::new(SeaOrmWalletService::new(store.clone()))
            as Arc<dyn WalletService + Send + Sync + 'static>;

        Self {
            config,
            store,
            catalog_service,
            content_service,
            lookup_service,
            engagement_service,
            auth_service,
            wallet_service,
        }
    }
}
