//! ERP gateway port
//!
//! Every call except `authenticate` needs the session token obtained first.

use async_trait::async_trait;
use erpbridge_domain::{
    ErpCategory, ErpItem, ErpItemBalance, ErpItemImage, ErpItemRef, ErpOrderDocument, Result,
    SessionToken,
};

/// Trait for ERP API operations
#[async_trait]
pub trait ErpGateway: Send + Sync {
    /// Exchange credentials for a session token.
    ///
    /// Returns `Ok(None)` when the server answers without issuing a session
    /// cookie. Transport failures are returned as errors.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<SessionToken>>;

    /// Fetch the complete category forest
    async fn fetch_categories(&self, session: &SessionToken) -> Result<Vec<ErpCategory>>;

    /// Fetch stock balances for every item
    async fn fetch_item_balances(&self, session: &SessionToken) -> Result<Vec<ErpItemBalance>>;

    /// Fetch image references for every item that has one
    async fn fetch_item_images(&self, session: &SessionToken) -> Result<Vec<ErpItemImage>>;

    /// Fetch the base64 image content for an image id
    async fn fetch_item_image_data(&self, session: &SessionToken, image_id: &str)
        -> Result<String>;

    /// Look an item up by its ERP id
    async fn find_item_by_id(
        &self,
        session: &SessionToken,
        item_id: &str,
    ) -> Result<Option<ErpItemRef>>;

    /// Look an item up by its storefront SKU (`LightCrmCode`)
    async fn find_item_by_code(
        &self,
        session: &SessionToken,
        code: &str,
    ) -> Result<Option<ErpItemRef>>;

    /// Fetch items changed after the given revision number
    async fn fetch_items(&self, session: &SessionToken, since_revision: i64)
        -> Result<Vec<ErpItem>>;

    /// Post a sales document
    async fn post_order(&self, session: &SessionToken, document: &ErpOrderDocument)
        -> Result<()>;
}
