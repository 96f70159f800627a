//! Item, balance and image records exchanged with the ERP, plus the product
//! shapes the storefront accepts.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Stock level per item code from `/services/sync/itembalances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpItemBalance {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Balance")]
    pub balance: Number,
}

/// One entry of the storefront's bulk quantity update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub sku: String,
    pub quantity: String,
}

/// Image reference from `/services/sync/itemimages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpItemImage {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "ItemID")]
    pub item_id: String,
}

/// Minimal item projection returned by the entity fetch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpItemRef {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "LightCrmCode", default)]
    pub light_crm_code: Option<String>,
}

/// Item record from `/services/sync/items`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErpItem {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ExtDescription", default)]
    pub ext_description: Option<String>,
    #[serde(rename = "ItemPrice")]
    pub item_price: Number,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "RevisionNumber")]
    pub revision_number: i64,
    #[serde(rename = "ItemCategories", default)]
    pub item_categories: Vec<ErpItemCategory>,
}

impl ErpItem {
    /// The most specific category is the last one the ERP lists.
    pub fn leaf_category_id(&self) -> Option<&str> {
        self.item_categories.last().map(|c| c.category_leaf_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpItemCategory {
    #[serde(rename = "CategoryLeafID")]
    pub category_leaf_id: String,
}

/// Body of `POST`/`PUT rest/product_admin/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub model: String,
    pub price: String,
    pub sku: String,
    pub product_store: Vec<i64>,
    pub product_description: Vec<ProductDescription>,
    pub product_category: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescription {
    pub language_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub meta_title: String,
    pub meta_description: Option<String>,
}

/// Decoded image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}
