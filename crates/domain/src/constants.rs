//! Application constants
//!
//! Centralized location for the policy values both systems agree on.

// ERP session
pub const ERP_SESSION_COOKIE: &str = "ss-id";

// Storefront auth header
pub const STOREFRONT_API_KEY_HEADER: &str = "X-Oc-Restadmin-Id";

// Storefront content language for generated descriptions
pub const STOREFRONT_LANGUAGE_ID: i64 = 2;

// Category payload structure (fixed policy, not derived from ERP data)
pub const CATEGORY_STATUS_ENABLED: &str = "1";
pub const CATEGORY_TOP_MENU: &str = "0";
pub const CATEGORY_COLUMNS: i64 = 1;
pub const CATEGORY_SORT_ORDER: i64 = 0;
pub const CATEGORY_LAYOUT_ID: &str = "3";
pub const DEFAULT_STORE_ID: &str = "0";
pub const ROOT_PARENT_ID: i64 = 0;

// Products
pub const FALLBACK_PRODUCT_CATEGORY_ID: i64 = 25;
pub const PRODUCT_STORE_ID: i64 = 0;
pub const INITIAL_REVISION_NUMBER: i64 = 0;
pub const ITEMS_REVISION_STATE_KEY: &str = "items.last_revision_number";

// Orders
pub const DEFAULT_ORDER_STATUS_ID: i64 = 1;
pub const DEFAULT_ORDER_CURRENCY: &str = "Ευρώ";
pub const ORDER_DOCUMENT_VERSION: &str = "2.3.2";
pub const ORDER_PROCESS_TYPE: &str = "B2C";
pub const ORDER_SOURCE: &str = "Webshop";
pub const ORDER_IDENTIFIER_CODELIST: &str = "RCP";
pub const ORDER_REVISION_NUMBER: i64 = 1;
pub const ORDER_LINE_ITEM_TYPE_ID: i64 = 0;
pub const ORDER_LINE_ID_SPECIFIER: &str = "ID";
