//! Product sync: ERP items newer than the stored revision cursor are created
//! or updated in the storefront.

use std::sync::Arc;

use erpbridge_domain::constants::{
    INITIAL_REVISION_NUMBER, ITEMS_REVISION_STATE_KEY, PRODUCT_STORE_ID, STOREFRONT_LANGUAGE_ID,
};
use erpbridge_domain::{
    BridgeError, ErpItem, MappingSnapshot, ProductDescription, ProductPayload, Result,
};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::erp_ports::ErpGateway;
use crate::storefront_ports::StorefrontGateway;
use crate::sync::{open_session, CategoryMappingRepository, ErpCredentials, SyncStateRepository};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProductSyncReport {
    pub fetched: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub last_revision: i64,
}

/// Build the storefront product body for an ERP item.
///
/// The product category is the mapping of the item's leaf category, or
/// `fallback_category_id` when the item has none or the leaf is unmapped.
pub fn to_product_payload(
    item: &ErpItem,
    snapshot: &MappingSnapshot,
    fallback_category_id: i64,
) -> ProductPayload {
    let category_id = item
        .leaf_category_id()
        .and_then(|leaf| snapshot.get(leaf))
        .unwrap_or(fallback_category_id);

    ProductPayload {
        model: item.code.clone(),
        price: item.item_price.to_string(),
        sku: item.code.clone(),
        product_store: vec![PRODUCT_STORE_ID],
        product_description: vec![ProductDescription {
            language_id: STOREFRONT_LANGUAGE_ID,
            name: item.description.clone(),
            description: item.ext_description.clone(),
            meta_title: item.description.clone(),
            meta_description: item.ext_description.clone(),
        }],
        product_category: vec![category_id],
    }
}

enum PushOutcome {
    Created,
    Updated(i64),
}

pub struct ProductSyncService {
    erp: Arc<dyn ErpGateway>,
    storefront: Arc<dyn StorefrontGateway>,
    mappings: Arc<dyn CategoryMappingRepository>,
    state: Arc<dyn SyncStateRepository>,
    credentials: ErpCredentials,
    fallback_category_id: i64,
}

impl ProductSyncService {
    pub fn new(
        erp: Arc<dyn ErpGateway>,
        storefront: Arc<dyn StorefrontGateway>,
        mappings: Arc<dyn CategoryMappingRepository>,
        state: Arc<dyn SyncStateRepository>,
        credentials: ErpCredentials,
        fallback_category_id: i64,
    ) -> Self {
        Self { erp, storefront, mappings, state, credentials, fallback_category_id }
    }

    /// Push every item above the cursor, advancing the cursor after each
    /// successful push.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<ProductSyncReport> {
        let session = open_session(self.erp.as_ref(), &self.credentials).await?;
        let cursor = self.load_cursor().await?;
        let snapshot: MappingSnapshot = self.mappings.load_all().await?.into_iter().collect();

        let items = self.erp.fetch_items(&session, cursor).await?;
        let mut report =
            ProductSyncReport { fetched: items.len(), last_revision: cursor, ..Default::default() };

        if items.is_empty() {
            info!(cursor, "all items have been synced");
            return Ok(report);
        }

        for item in &items {
            let payload = to_product_payload(item, &snapshot, self.fallback_category_id);

            match self.push(&payload).await {
                Ok(outcome) => {
                    match outcome {
                        PushOutcome::Created => {
                            info!(sku = %item.code, name = %item.description, "product created in storefront");
                            report.created += 1;
                        }
                        PushOutcome::Updated(product_id) => {
                            info!(sku = %item.code, product_id, "product updated in storefront");
                            report.updated += 1;
                        }
                    }
                    self.state
                        .set_value(ITEMS_REVISION_STATE_KEY, &item.revision_number.to_string())
                        .await?;
                    report.last_revision = item.revision_number;
                }
                Err(err) => {
                    error!(sku = %item.code, error = %err, "error pushing product to storefront");
                    report.failed += 1;
                }
            }
        }

        info!(
            fetched = report.fetched,
            created = report.created,
            updated = report.updated,
            failed = report.failed,
            last_revision = report.last_revision,
            "product synchronization completed"
        );
        Ok(report)
    }

    async fn push(&self, payload: &ProductPayload) -> Result<PushOutcome> {
        match self.storefront.find_product_id_by_sku(&payload.sku).await? {
            Some(product_id) => {
                self.storefront.update_product(product_id, payload).await?;
                Ok(PushOutcome::Updated(product_id))
            }
            None => {
                self.storefront.create_product(payload).await?;
                Ok(PushOutcome::Created)
            }
        }
    }

    async fn load_cursor(&self) -> Result<i64> {
        let Some(raw) = self.state.get_value(ITEMS_REVISION_STATE_KEY).await? else {
            return Ok(INITIAL_REVISION_NUMBER);
        };

        raw.trim().parse().map_err(|_| {
            BridgeError::InvalidInput(format!("stored revision cursor is not a number: {raw}"))
        })
    }
}
