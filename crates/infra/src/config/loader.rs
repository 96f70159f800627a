//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ERPBRIDGE_DB_PATH`: Mapping database file path
//! - `ERPBRIDGE_DB_POOL_SIZE`: Connection pool size (optional, default 4)
//! - `ERPBRIDGE_ERP_HOST` / `ERPBRIDGE_ERP_PORT`: ERP server address
//! - `ERPBRIDGE_ERP_USERNAME` / `ERPBRIDGE_ERP_PASSWORD`: ERP credentials
//! - `ERPBRIDGE_STORE_DOMAIN`: Storefront host name
//! - `ERPBRIDGE_STORE_PATH`: Path prefix before `/index.php` (optional)
//! - `ERPBRIDGE_STORE_SCHEME`: `https` (default) or `http`
//! - `ERPBRIDGE_STORE_API_KEY`: REST admin key
//! - `ERPBRIDGE_ORDER_COMPANY_ID` / `ERPBRIDGE_ORDER_TRADER_ID`: enable order
//!   export when both are set
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./erpbridge.json` or `./erpbridge.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use erpbridge_domain::constants::{
    DEFAULT_ORDER_CURRENCY, DEFAULT_ORDER_STATUS_ID, FALLBACK_PRODUCT_CATEGORY_ID,
};
use erpbridge_domain::{
    BridgeError, Config, DatabaseConfig, ErpConfig, OrderConfig, Result, StorefrontConfig,
};

const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_SCHEME: &str = "https";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `BridgeError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `BridgeError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("ERPBRIDGE_DB_PATH")?;
    let pool_size = env_parse("ERPBRIDGE_DB_POOL_SIZE", "pool size")?.unwrap_or(DEFAULT_POOL_SIZE);

    let erp = ErpConfig {
        host: env_var("ERPBRIDGE_ERP_HOST")?,
        port: env_parse("ERPBRIDGE_ERP_PORT", "ERP port")?.ok_or_else(|| {
            BridgeError::Config("Missing required environment variable: ERPBRIDGE_ERP_PORT".into())
        })?,
        username: env_var("ERPBRIDGE_ERP_USERNAME")?,
        password: env_var("ERPBRIDGE_ERP_PASSWORD")?,
    };

    let storefront = StorefrontConfig {
        domain: env_var("ERPBRIDGE_STORE_DOMAIN")?,
        path: std::env::var("ERPBRIDGE_STORE_PATH").unwrap_or_default(),
        scheme: std::env::var("ERPBRIDGE_STORE_SCHEME")
            .unwrap_or_else(|_| DEFAULT_SCHEME.to_string()),
        api_key: env_var("ERPBRIDGE_STORE_API_KEY")?,
        default_product_category_id: FALLBACK_PRODUCT_CATEGORY_ID,
    };

    let orders = match (
        std::env::var("ERPBRIDGE_ORDER_COMPANY_ID").ok(),
        std::env::var("ERPBRIDGE_ORDER_TRADER_ID").ok(),
    ) {
        (Some(company_id), Some(trader_id)) => Some(OrderConfig {
            company_id,
            trader_id,
            status_id: DEFAULT_ORDER_STATUS_ID,
            currency: DEFAULT_ORDER_CURRENCY.to_string(),
        }),
        _ => None,
    };

    Ok(Config { database: DatabaseConfig { path: db_path, pool_size }, erp, storefront, orders })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BridgeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BridgeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BridgeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BridgeError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BridgeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(base: &Path) -> Vec<PathBuf> {
    vec![
        base.join("config.json"),
        base.join("config.toml"),
        base.join("erpbridge.json"),
        base.join("erpbridge.toml"),
        base.join("../config.json"),
        base.join("../config.toml"),
        base.join("../../config.json"),
        base.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        BridgeError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional numeric environment variable
fn env_parse<T>(key: &str, label: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| BridgeError::Config(format!("Invalid {}: {}", label, e))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
