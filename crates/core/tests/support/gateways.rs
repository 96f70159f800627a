//! Fake ERP and storefront gateways
//!
//! Both fakes record every call and can be told to fail specific records.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use erpbridge_core::{ErpGateway, StorefrontGateway};
use erpbridge_domain::{
    BridgeError, CategoryPayload, ErpCategory, ErpItem, ErpItemBalance, ErpItemImage, ErpItemRef,
    ErpOrderDocument, ImageUpload, ParentLink, ProductPayload, QuantityUpdate, Result,
    SessionToken, StorefrontOrder,
};

pub const SESSION: &str = "session-abc";

/// How the fake ERP answers `/auth`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Issue,
    NoCookie,
    Unreachable,
}

#[derive(Default)]
pub struct FakeErp {
    pub auth: AuthMode,
    pub categories: Vec<ErpCategory>,
    pub fail_category_fetch: bool,
    pub balances: Vec<ErpItemBalance>,
    pub images: Vec<ErpItemImage>,
    pub image_data: HashMap<String, String>,
    /// item id → SKU
    pub skus_by_item_id: HashMap<String, String>,
    /// SKU → item id
    pub item_ids_by_sku: HashMap<String, String>,
    pub items: Vec<ErpItem>,
    pub fail_order_ids: HashSet<i64>,
    pub requested_revisions: Mutex<Vec<i64>>,
    pub posted_orders: Mutex<Vec<ErpOrderDocument>>,
    pub fetch_calls: Mutex<usize>,
}

impl FakeErp {
    pub fn with_categories(categories: Vec<ErpCategory>) -> Self {
        Self { categories, ..Default::default() }
    }

    pub fn posted_orders(&self) -> Vec<ErpOrderDocument> {
        self.posted_orders.lock().expect("lock").clone()
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().expect("lock")
    }

    fn check_session(session: &SessionToken) -> Result<()> {
        if session.as_str() == SESSION {
            Ok(())
        } else {
            Err(BridgeError::Auth("unknown session".into()))
        }
    }
}

#[async_trait]
impl ErpGateway for FakeErp {
    async fn authenticate(&self, _username: &str, _password: &str) -> Result<Option<SessionToken>> {
        match self.auth {
            AuthMode::Issue => Ok(Some(SessionToken::new(SESSION))),
            AuthMode::NoCookie => Ok(None),
            AuthMode::Unreachable => Err(BridgeError::Network("connection refused".into())),
        }
    }

    async fn fetch_categories(&self, session: &SessionToken) -> Result<Vec<ErpCategory>> {
        Self::check_session(session)?;
        *self.fetch_calls.lock().expect("lock") += 1;
        if self.fail_category_fetch {
            return Err(BridgeError::Network("ERP returned 500".into()));
        }
        Ok(self.categories.clone())
    }

    async fn fetch_item_balances(&self, session: &SessionToken) -> Result<Vec<ErpItemBalance>> {
        Self::check_session(session)?;
        Ok(self.balances.clone())
    }

    async fn fetch_item_images(&self, session: &SessionToken) -> Result<Vec<ErpItemImage>> {
        Self::check_session(session)?;
        Ok(self.images.clone())
    }

    async fn fetch_item_image_data(
        &self,
        session: &SessionToken,
        image_id: &str,
    ) -> Result<String> {
        Self::check_session(session)?;
        self.image_data
            .get(image_id)
            .cloned()
            .ok_or_else(|| BridgeError::NotFound(format!("image {image_id}")))
    }

    async fn find_item_by_id(
        &self,
        session: &SessionToken,
        item_id: &str,
    ) -> Result<Option<ErpItemRef>> {
        Self::check_session(session)?;
        Ok(self.skus_by_item_id.get(item_id).map(|sku| ErpItemRef {
            id: item_id.to_string(),
            light_crm_code: Some(sku.clone()),
        }))
    }

    async fn find_item_by_code(
        &self,
        session: &SessionToken,
        code: &str,
    ) -> Result<Option<ErpItemRef>> {
        Self::check_session(session)?;
        Ok(self.item_ids_by_sku.get(code).map(|id| ErpItemRef {
            id: id.clone(),
            light_crm_code: Some(code.to_string()),
        }))
    }

    async fn fetch_items(&self, session: &SessionToken, since_revision: i64) -> Result<Vec<ErpItem>> {
        Self::check_session(session)?;
        self.requested_revisions.lock().expect("lock").push(since_revision);
        Ok(self.items.iter().filter(|item| item.revision_number > since_revision).cloned().collect())
    }

    async fn post_order(&self, session: &SessionToken, document: &ErpOrderDocument) -> Result<()> {
        Self::check_session(session)?;
        if self.fail_order_ids.contains(&document.doc_id()) {
            return Err(BridgeError::Network("Invalid trader".into()));
        }
        self.posted_orders.lock().expect("lock").push(document.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct StorefrontState {
    next_id: i64,
    created_categories: Vec<(i64, CategoryPayload)>,
    links: Vec<(i64, ParentLink)>,
    quantity_batches: Vec<Vec<QuantityUpdate>>,
    created_products: Vec<ProductPayload>,
    updated_products: Vec<(i64, ProductPayload)>,
    uploads: Vec<(i64, ImageUpload)>,
}

#[derive(Default)]
pub struct FakeStorefront {
    /// Category names whose creation is rejected
    pub fail_create_names: HashSet<String>,
    /// Storefront category ids whose parent update is rejected
    pub fail_link_ids: HashSet<i64>,
    pub fail_quantities: bool,
    pub fail_product_skus: HashSet<String>,
    pub products_by_sku: HashMap<String, i64>,
    pub orders: Vec<StorefrontOrder>,
    pub state: Mutex<StorefrontState>,
}

impl FakeStorefront {
    /// First category id handed out; subsequent ids count up from here.
    pub const FIRST_CATEGORY_ID: i64 = 100;

    pub fn created_categories(&self) -> Vec<(i64, CategoryPayload)> {
        self.state.lock().expect("lock").created_categories.clone()
    }

    pub fn links(&self) -> Vec<(i64, ParentLink)> {
        self.state.lock().expect("lock").links.clone()
    }

    pub fn quantity_batches(&self) -> Vec<Vec<QuantityUpdate>> {
        self.state.lock().expect("lock").quantity_batches.clone()
    }

    pub fn created_products(&self) -> Vec<ProductPayload> {
        self.state.lock().expect("lock").created_products.clone()
    }

    pub fn updated_products(&self) -> Vec<(i64, ProductPayload)> {
        self.state.lock().expect("lock").updated_products.clone()
    }

    pub fn uploads(&self) -> Vec<(i64, ImageUpload)> {
        self.state.lock().expect("lock").uploads.clone()
    }
}

#[async_trait]
impl StorefrontGateway for FakeStorefront {
    async fn create_category(&self, payload: &CategoryPayload) -> Result<i64> {
        if self.fail_create_names.contains(payload.name()) {
            return Err(BridgeError::Network("storefront returned 500".into()));
        }
        let mut state = self.state.lock().expect("lock");
        let id = Self::FIRST_CATEGORY_ID + state.next_id;
        state.next_id += 1;
        state.created_categories.push((id, payload.clone()));
        Ok(id)
    }

    async fn link_category_parent(&self, category_id: i64, link: ParentLink) -> Result<()> {
        if self.fail_link_ids.contains(&category_id) {
            return Err(BridgeError::Network("storefront returned 500".into()));
        }
        self.state.lock().expect("lock").links.push((category_id, link));
        Ok(())
    }

    async fn update_quantities(&self, updates: &[QuantityUpdate]) -> Result<()> {
        if self.fail_quantities {
            return Err(BridgeError::Network("storefront returned 502".into()));
        }
        self.state.lock().expect("lock").quantity_batches.push(updates.to_vec());
        Ok(())
    }

    async fn find_product_id_by_sku(&self, sku: &str) -> Result<Option<i64>> {
        Ok(self.products_by_sku.get(sku).copied())
    }

    async fn upload_product_image(&self, product_id: i64, image: ImageUpload) -> Result<()> {
        self.state.lock().expect("lock").uploads.push((product_id, image));
        Ok(())
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<()> {
        if self.fail_product_skus.contains(&payload.sku) {
            return Err(BridgeError::Network("storefront returned 500".into()));
        }
        self.state.lock().expect("lock").created_products.push(payload.clone());
        Ok(())
    }

    async fn update_product(&self, product_id: i64, payload: &ProductPayload) -> Result<()> {
        if self.fail_product_skus.contains(&payload.sku) {
            return Err(BridgeError::Network("storefront returned 500".into()));
        }
        self.state.lock().expect("lock").updated_products.push((product_id, payload.clone()));
        Ok(())
    }

    async fn list_orders(&self, _status_id: i64) -> Result<Vec<StorefrontOrder>> {
        Ok(self.orders.clone())
    }
}
