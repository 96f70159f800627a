//! Order sync: storefront orders are exported to the ERP as sales documents.

use std::sync::Arc;

use erpbridge_domain::constants::{
    ORDER_DOCUMENT_VERSION, ORDER_IDENTIFIER_CODELIST, ORDER_LINE_ID_SPECIFIER,
    ORDER_LINE_ITEM_TYPE_ID, ORDER_PROCESS_TYPE, ORDER_REVISION_NUMBER, ORDER_SOURCE,
};
use erpbridge_domain::{
    BridgeError, Descr, ErpAddress, ErpCompany, ErpDeliveryInfo, ErpIdentifier, ErpItemIdentifier,
    ErpLineItem, ErpOrderBody, ErpOrderData, ErpOrderDocument, ErpOrderHeader, ErpOrderLine,
    ErpTrader, OrderConfig, Result, SessionToken, StorefrontOrder,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::erp_ports::ErpGateway;
use crate::storefront_ports::StorefrontGateway;
use crate::sync::{open_session, ErpCredentials};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderSyncReport {
    pub fetched: usize,
    pub posted: usize,
    pub failed: usize,
    pub dropped_lines: usize,
}

fn identifier(id: &str) -> ErpIdentifier {
    ErpIdentifier { id: id.to_string(), codelist: ORDER_IDENTIFIER_CODELIST.to_string() }
}

fn payment_address(order: &StorefrontOrder) -> ErpAddress {
    ErpAddress {
        country: Descr::new(&order.payment_country),
        prefecture: Descr::new(&order.payment_zone),
        city: Descr::new(&order.payment_city),
        zipcode: order.payment_postcode.clone(),
        streetname: order.payment_address_1.clone(),
        streetnum: order.payment_address_2.clone(),
    }
}

fn shipping_address(order: &StorefrontOrder) -> ErpAddress {
    ErpAddress {
        country: Descr::new(&order.shipping_country),
        prefecture: Descr::new(&order.shipping_zone),
        city: Descr::new(&order.shipping_city),
        zipcode: order.shipping_postcode.clone(),
        streetname: order.shipping_address_1.clone(),
        streetnum: order.shipping_address_2.clone(),
    }
}

/// Build the ERP document for `order` with the given, already resolved lines.
///
/// Billing and trader addresses come from the payment fields, delivery from
/// the shipping fields.
pub fn to_order_document(
    order: &StorefrontOrder,
    settings: &OrderConfig,
    lines: Vec<ErpOrderLine>,
) -> ErpOrderDocument {
    ErpOrderDocument {
        body: ErpOrderBody {
            header: ErpOrderHeader {
                version: ORDER_DOCUMENT_VERSION.to_string(),
                processtype: ORDER_PROCESS_TYPE.to_string(),
                source: ORDER_SOURCE.to_string(),
            },
            data: ErpOrderData {
                company: ErpCompany { identifier: identifier(&settings.company_id) },
                revisionnumber: ORDER_REVISION_NUMBER,
                doccurrency: Descr::new(&settings.currency),
                docid: order.order_id,
                docdate: order.date_added.clone(),
                billtoaddress: payment_address(order),
                deliveryinfo: ErpDeliveryInfo {
                    delivdate: order.date_added.clone(),
                    address: shipping_address(order),
                    telephone: order.telephone.clone(),
                    email: order.email.clone(),
                },
                trader: ErpTrader {
                    identifier: identifier(&settings.trader_id),
                    name: format!("{} {}", order.firstname, order.lastname),
                    address: payment_address(order),
                    telephone: order.telephone.clone(),
                    email: order.email.clone(),
                },
                lines,
            },
        },
    }
}

pub fn order_line(erp_item_id: &str, quantity: i64, total: f64) -> ErpOrderLine {
    ErpOrderLine {
        item: ErpLineItem {
            mgitemtypeid: ORDER_LINE_ITEM_TYPE_ID,
            identifier: ErpItemIdentifier {
                id: erp_item_id.to_string(),
                idspecifier: ORDER_LINE_ID_SPECIFIER.to_string(),
            },
        },
        qty: quantity,
        totalamount: total,
        chargestotal: 0,
    }
}

pub struct OrderSyncService {
    erp: Arc<dyn ErpGateway>,
    storefront: Arc<dyn StorefrontGateway>,
    credentials: ErpCredentials,
    settings: Option<OrderConfig>,
}

impl OrderSyncService {
    pub fn new(
        erp: Arc<dyn ErpGateway>,
        storefront: Arc<dyn StorefrontGateway>,
        credentials: ErpCredentials,
        settings: Option<OrderConfig>,
    ) -> Self {
        Self { erp, storefront, credentials, settings }
    }

    /// Export every storefront order in the configured status.
    ///
    /// Fails with [`BridgeError::Config`] when no order settings are present.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<OrderSyncReport> {
        let settings = self.settings.as_ref().ok_or_else(|| {
            BridgeError::Config("order sync requires the `orders` configuration section".into())
        })?;

        let session = open_session(self.erp.as_ref(), &self.credentials).await?;
        let orders = self.storefront.list_orders(settings.status_id).await?;

        let mut report = OrderSyncReport { fetched: orders.len(), ..Default::default() };

        for order in &orders {
            let document = match self.build_document(&session, order, settings, &mut report).await
            {
                Ok(document) => document,
                Err(err) => {
                    error!(order_id = order.order_id, error = %err, "error building ERP order");
                    report.failed += 1;
                    continue;
                }
            };

            match self.erp.post_order(&session, &document).await {
                Ok(()) => {
                    info!(order_id = document.doc_id(), "order posted to ERP");
                    report.posted += 1;
                }
                Err(err) => {
                    error!(order_id = document.doc_id(), error = %err, "error posting order to ERP");
                    report.failed += 1;
                }
            }
        }

        info!(
            fetched = report.fetched,
            posted = report.posted,
            failed = report.failed,
            dropped_lines = report.dropped_lines,
            "order synchronization completed"
        );
        Ok(report)
    }

    async fn build_document(
        &self,
        session: &SessionToken,
        order: &StorefrontOrder,
        settings: &OrderConfig,
        report: &mut OrderSyncReport,
    ) -> Result<ErpOrderDocument> {
        let mut lines = Vec::with_capacity(order.products.len());

        for product in &order.products {
            match self.erp.find_item_by_code(session, &product.sku).await? {
                Some(item) => lines.push(order_line(&item.id, product.quantity, product.total)),
                None => {
                    warn!(order_id = order.order_id, sku = %product.sku, "product not found in ERP; dropping line");
                    report.dropped_lines += 1;
                }
            }
        }

        Ok(to_order_document(order, settings, lines))
    }
}
