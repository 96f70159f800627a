//! Storefront gateway port

use async_trait::async_trait;
use erpbridge_domain::{
    CategoryPayload, ImageUpload, ParentLink, ProductPayload, QuantityUpdate, Result,
    StorefrontOrder,
};

/// Trait for storefront admin API operations
#[async_trait]
pub trait StorefrontGateway: Send + Sync {
    /// Create a category and return the id the storefront assigned to it
    async fn create_category(&self, payload: &CategoryPayload) -> Result<i64>;

    /// Set the parent of an existing category, leaving every other field alone
    async fn link_category_parent(&self, category_id: i64, link: ParentLink) -> Result<()>;

    /// Apply stock quantities by SKU in a single request
    async fn update_quantities(&self, updates: &[QuantityUpdate]) -> Result<()>;

    /// Resolve a product id from its SKU
    async fn find_product_id_by_sku(&self, sku: &str) -> Result<Option<i64>>;

    /// Attach an image to a product
    async fn upload_product_image(&self, product_id: i64, image: ImageUpload) -> Result<()>;

    /// Create a product
    async fn create_product(&self, payload: &ProductPayload) -> Result<()>;

    /// Replace an existing product
    async fn update_product(&self, product_id: i64, payload: &ProductPayload) -> Result<()>;

    /// List orders in the given status, with their lines
    async fn list_orders(&self, status_id: i64) -> Result<Vec<StorefrontOrder>>;
}
