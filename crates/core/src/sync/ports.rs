//! Port interfaces for sync state persistence

use async_trait::async_trait;
use erpbridge_domain::{CategoryMapping, Result};

/// Trait for the ERP category → storefront category mapping store
#[async_trait]
pub trait CategoryMappingRepository: Send + Sync {
    /// Load every mapping
    async fn load_all(&self) -> Result<Vec<CategoryMapping>>;

    /// Check whether an ERP category already has a mapping
    async fn exists(&self, erp_id: &str) -> Result<bool>;

    /// Persist a new mapping.
    ///
    /// Fails with `BridgeError::Conflict` if `erp_id` is already mapped;
    /// existing mappings are never overwritten.
    async fn create(&self, mapping: &CategoryMapping) -> Result<()>;
}

/// Trait for small named cursors that survive between runs
#[async_trait]
pub trait SyncStateRepository: Send + Sync {
    /// Read a stored value
    async fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a stored value
    async fn set_value(&self, key: &str, value: &str) -> Result<()>;
}
