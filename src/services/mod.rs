pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod content_service;
pub mod content_service_impl;
pub use content_service::ContentService;
pub use content_service_impl::SeaOrmContentService;

pub mod engagement_service;
pub mod engagement_service_impl;
pub use engagement_service::{EngagementError, EngagementService};
pub use engagement_service_impl::SeaOrmEngagementService;

pub mod lookup_service;
pub mod lookup_service_impl;
pub use lookup_service::{LookupError, LookupService};
pub use lookup_service_impl::SeaOrmLookupService;

pub mod wallet_service;
pub mod wallet_service_impl;
pub use wallet_service::{WalletError, WalletService};
pub use wallet_service_impl::SeaOrmWalletService;
