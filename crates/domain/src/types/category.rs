//! Category records on both sides of the bridge and the mapping between them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque ERP session token taken from the `ss-id` cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Category node as delivered by `/services/sync/itemcategories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpCategory {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "ParentNodeID", default)]
    pub parent_node_id: Option<String>,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Persisted correspondence between an ERP category and its storefront copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMapping {
    pub erp_id: String,
    pub opencart_id: i64,
    pub created_at: i64,
}

impl CategoryMapping {
    pub fn new(erp_id: impl Into<String>, opencart_id: i64) -> Self {
        Self { erp_id: erp_id.into(), opencart_id, created_at: chrono::Utc::now().timestamp() }
    }
}

/// Immutable `erp_id -> opencart_id` view of the mapping store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSnapshot {
    entries: HashMap<String, i64>,
}

impl MappingSnapshot {
    pub fn get(&self, erp_id: &str) -> Option<i64> {
        self.entries.get(erp_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CategoryMapping> for MappingSnapshot {
    fn from_iter<I: IntoIterator<Item = CategoryMapping>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|m| (m.erp_id, m.opencart_id)).collect() }
    }
}

impl FromIterator<(String, i64)> for MappingSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Body of `POST rest/category_admin/category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub category_description: Vec<CategoryDescription>,
    pub sort_order: i64,
    pub category_store: Vec<String>,
    pub parent_id: i64,
    pub status: String,
    pub column: i64,
    pub top: String,
    pub category_layout: Vec<String>,
    pub keyword: String,
}

impl CategoryPayload {
    /// Display name of the first description block.
    pub fn name(&self) -> &str {
        self.category_description.first().map_or("", |d| d.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescription {
    pub name: String,
    pub description: String,
    pub language_id: i64,
    pub meta_description: String,
    pub meta_keyword: String,
    pub meta_title: String,
}

/// Body of the phase-2 `PUT`; only the parent is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub parent_id: i64,
}
