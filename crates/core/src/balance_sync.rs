//! Stock balance sync: ERP item balances → storefront quantities by SKU

use std::sync::Arc;

use erpbridge_domain::{ErpItemBalance, QuantityUpdate, Result};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::erp_ports::ErpGateway;
use crate::storefront_ports::StorefrontGateway;
use crate::sync::{open_session, ErpCredentials};

/// Outcome of one balance sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSyncReport {
    pub fetched: usize,
    pub updated: usize,
    pub failed: bool,
}

pub fn to_quantity_update(balance: &ErpItemBalance) -> QuantityUpdate {
    QuantityUpdate { sku: balance.code.clone(), quantity: balance.balance.to_string() }
}

pub struct BalanceSyncService {
    erp: Arc<dyn ErpGateway>,
    storefront: Arc<dyn StorefrontGateway>,
    credentials: ErpCredentials,
}

impl BalanceSyncService {
    pub fn new(
        erp: Arc<dyn ErpGateway>,
        storefront: Arc<dyn StorefrontGateway>,
        credentials: ErpCredentials,
    ) -> Self {
        Self { erp, storefront, credentials }
    }

    /// Push every ERP balance to the storefront in one bulk update.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<BalanceSyncReport> {
        let session = open_session(self.erp.as_ref(), &self.credentials).await?;
        let balances = self.erp.fetch_item_balances(&session).await?;

        let mut report = BalanceSyncReport { fetched: balances.len(), ..Default::default() };

        if balances.is_empty() {
            warn!("no item balances retrieved from ERP");
            return Ok(report);
        }

        let updates: Vec<QuantityUpdate> = balances.iter().map(to_quantity_update).collect();

        match self.storefront.update_quantities(&updates).await {
            Ok(()) => {
                info!(count = updates.len(), "product quantities updated in storefront");
                report.updated = updates.len();
            }
            Err(err) => {
                error!(count = updates.len(), error = %err, "error updating product quantities");
                report.failed = true;
            }
        }

        info!(fetched = report.fetched, updated = report.updated, "balance synchronization completed");
        Ok(report)
    }
}
