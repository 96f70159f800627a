//! Storefront orders and the ERP sales document they are exported as.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Order as returned by `rest/order_admin/listorderswithdetails`.
///
/// OpenCart renders numeric columns as strings, so ids and amounts accept
/// both forms. Address fields the store leaves out decode as empty strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontOrder {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub order_id: i64,
    pub date_added: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub telephone: String,
    pub payment_country: String,
    pub payment_zone: String,
    pub payment_city: String,
    pub payment_postcode: String,
    pub payment_address_1: String,
    pub payment_address_2: String,
    pub shipping_country: String,
    pub shipping_zone: String,
    pub shipping_city: String,
    pub shipping_postcode: String,
    pub shipping_address_1: String,
    pub shipping_address_2: String,
    pub products: Vec<StorefrontOrderProduct>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontOrderProduct {
    pub sku: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub quantity: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total: f64,
}

/// Top-level document posted to `/services/sync/actions/postentry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpOrderDocument {
    pub body: ErpOrderBody,
}

impl ErpOrderDocument {
    pub fn doc_id(&self) -> i64 {
        self.body.data.docid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpOrderBody {
    pub header: ErpOrderHeader,
    pub data: ErpOrderData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpOrderHeader {
    pub version: String,
    pub processtype: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpOrderData {
    pub company: ErpCompany,
    pub revisionnumber: i64,
    pub doccurrency: Descr,
    pub docid: i64,
    pub docdate: String,
    pub billtoaddress: ErpAddress,
    pub deliveryinfo: ErpDeliveryInfo,
    pub trader: ErpTrader,
    pub lines: Vec<ErpOrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpCompany {
    pub identifier: ErpIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpIdentifier {
    pub id: String,
    pub codelist: String,
}

/// ERP lookup values are referenced by their description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descr {
    pub descr: String,
}

impl Descr {
    pub fn new(descr: impl Into<String>) -> Self {
        Self { descr: descr.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpAddress {
    pub country: Descr,
    pub prefecture: Descr,
    pub city: Descr,
    pub zipcode: String,
    pub streetname: String,
    pub streetnum: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpDeliveryInfo {
    pub delivdate: String,
    pub address: ErpAddress,
    pub telephone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpTrader {
    pub identifier: ErpIdentifier,
    pub name: String,
    pub address: ErpAddress,
    pub telephone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpOrderLine {
    pub item: ErpLineItem,
    pub qty: i64,
    pub totalamount: f64,
    pub chargestotal: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpLineItem {
    pub mgitemtypeid: i64,
    pub identifier: ErpItemIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpItemIdentifier {
    pub id: String,
    pub idspecifier: String,
}
