//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ORDER_CURRENCY, DEFAULT_ORDER_STATUS_ID, FALLBACK_PRODUCT_CATEGORY_ID};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub erp: ErpConfig,
    pub storefront: StorefrontConfig,
    #[serde(default)]
    pub orders: Option<OrderConfig>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// ERP connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl ErpConfig {
    /// Base URL for every ERP call, e.g. `http://10.0.0.5:8080`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Storefront (OpenCart REST admin) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    pub domain: String,
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Category assigned to products whose ERP category has no mapping.
    #[serde(default = "default_product_category_id")]
    pub default_product_category_id: i64,
}

impl StorefrontConfig {
    /// Entry script every REST route is dispatched through.
    pub fn index_url(&self) -> String {
        format!("{}://{}{}/index.php", self.scheme, self.domain, self.path.trim_end_matches('/'))
    }
}

/// Order export settings. Order sync refuses to run without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    pub company_id: String,
    pub trader_id: String,
    #[serde(default = "default_order_status_id")]
    pub status_id: i64,
    #[serde(default = "default_order_currency")]
    pub currency: String,
}

fn default_pool_size() -> u32 {
    4
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_product_category_id() -> i64 {
    FALLBACK_PRODUCT_CATEGORY_ID
}

fn default_order_status_id() -> i64 {
    DEFAULT_ORDER_STATUS_ID
}

fn default_order_currency() -> String {
    DEFAULT_ORDER_CURRENCY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storefront(path: &str) -> StorefrontConfig {
        StorefrontConfig {
            domain: "shop.example.com".into(),
            path: path.into(),
            scheme: default_scheme(),
            api_key: "key".into(),
            default_product_category_id: default_product_category_id(),
        }
    }

    #[test]
    fn index_url_joins_domain_and_path() {
        assert_eq!(storefront("/store").index_url(), "https://shop.example.com/store/index.php");
        assert_eq!(storefront("").index_url(), "https://shop.example.com/index.php");
        assert_eq!(storefront("/store/").index_url(), "https://shop.example.com/store/index.php");
    }

    #[test]
    fn secrets_are_not_serialized() {
        let erp = ErpConfig {
            host: "10.0.0.5".into(),
            port: 8080,
            username: "sync".into(),
            password: "hunter2".into(),
        };

        let json = serde_json::to_string(&erp).expect("serializable");
        assert!(!json.contains("hunter2"));
        assert_eq!(erp.base_url(), "http://10.0.0.5:8080");
    }
}
