//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;
use std::path::PathBuf;

use erpbridge_infra::config;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "database": {"path": "/var/lib/erpbridge/bridge.db", "pool_size": 8},
            "erp": {"host": "10.0.0.5", "port": 8080, "username": "sync", "password": "secret"},
            "storefront": {
                "domain": "shop.example.com",
                "path": "/store/",
                "scheme": "http",
                "api_key": "key-123"
            }
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config from JSON file");

    assert_eq!(config.database.path, "/var/lib/erpbridge/bridge.db");
    assert_eq!(config.database.pool_size, 8);
    assert_eq!(config.erp.base_url(), "http://10.0.0.5:8080");
    assert_eq!(config.storefront.index_url(), "http://shop.example.com/store/index.php");
    assert_eq!(config.storefront.api_key, "key-123");
    assert!(config.orders.is_none());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file_with_orders() {
    let path = write_config(
        r#"
[database]
path = "bridge.db"

[erp]
host = "erp.local"
port = 9000
username = "sync"
password = "secret"

[storefront]
domain = "shop.local"
api_key = "key"

[orders]
company_id = "c-1"
trader_id = "t-1"
currency = "EUR"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config from TOML file");

    let orders = config.orders.expect("orders section");
    assert_eq!(orders.company_id, "c-1");
    assert_eq!(orders.trader_id, "t-1");
    assert_eq!(orders.status_id, 1);
    assert_eq!(orders.currency, "EUR");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_required_section_is_rejected() {
    let path = write_config(r#"{"database": {"path": "bridge.db"}}"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err(), "config without erp/storefront must fail");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_secrets_are_not_serialized() {
    let path = write_config(
        r#"{
            "database": {"path": "bridge.db"},
            "erp": {"host": "h", "port": 1, "username": "u", "password": "topsecret"},
            "storefront": {"domain": "d", "api_key": "apikey"}
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config");
    let rendered = serde_json::to_string(&config).expect("serialize");

    assert!(!rendered.contains("topsecret"));
    assert!(!rendered.contains("apikey"));

    std::fs::remove_file(path).ok();
}
