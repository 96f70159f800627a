//! Application context - dependency injection container

use std::sync::Arc;

use erpbridge_core::{
    BalanceSyncService, CategoryMappingRepository, CategorySyncService, ErpCredentials,
    ErpGateway, ImageSyncService, OrderSyncService, ProductSyncService, StorefrontGateway,
    SyncStateRepository,
};
use erpbridge_domain::{Config, Result};
use erpbridge_infra::{
    DbManager, ErpClient, SqliteCategoryMappingRepository, SqliteSyncStateRepository,
    StorefrontClient,
};
use tracing::info;

/// Application context - holds the adapters every job is built from
pub struct AppContext {
    pub config: Config,
    erp: Arc<dyn ErpGateway>,
    storefront: Arc<dyn StorefrontGateway>,
    mappings: Arc<dyn CategoryMappingRepository>,
    state: Arc<dyn SyncStateRepository>,
}

impl AppContext {
    /// Open the mapping store and build both HTTP clients.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;
        db.health_check()?;
        info!(db_path = %db.path().display(), "mapping store ready");

        let erp: Arc<dyn ErpGateway> = Arc::new(ErpClient::new(&config.erp)?);
        let storefront: Arc<dyn StorefrontGateway> =
            Arc::new(StorefrontClient::new(&config.storefront)?);
        let mappings: Arc<dyn CategoryMappingRepository> =
            Arc::new(SqliteCategoryMappingRepository::new(Arc::clone(&db)));
        let state: Arc<dyn SyncStateRepository> =
            Arc::new(SqliteSyncStateRepository::new(Arc::clone(&db)));

        Ok(Self { config, erp, storefront, mappings, state })
    }

    fn credentials(&self) -> ErpCredentials {
        ErpCredentials::from(&self.config.erp)
    }

    pub fn category_sync(&self) -> CategorySyncService {
        CategorySyncService::new(
            Arc::clone(&self.erp),
            Arc::clone(&self.storefront),
            Arc::clone(&self.mappings),
            self.credentials(),
        )
    }

    pub fn balance_sync(&self) -> BalanceSyncService {
        BalanceSyncService::new(Arc::clone(&self.erp), Arc::clone(&self.storefront), self.credentials())
    }

    pub fn image_sync(&self) -> ImageSyncService {
        ImageSyncService::new(Arc::clone(&self.erp), Arc::clone(&self.storefront), self.credentials())
    }

    pub fn product_sync(&self) -> ProductSyncService {
        ProductSyncService::new(
            Arc::clone(&self.erp),
            Arc::clone(&self.storefront),
            Arc::clone(&self.mappings),
            Arc::clone(&self.state),
            self.credentials(),
            self.config.storefront.default_product_category_id,
        )
    }

    pub fn order_sync(&self) -> OrderSyncService {
        OrderSyncService::new(
            Arc::clone(&self.erp),
            Arc::clone(&self.storefront),
            self.credentials(),
            self.config.orders.clone(),
        )
    }
}
