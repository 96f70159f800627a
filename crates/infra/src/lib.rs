//! # ERP Bridge Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (environment and JSON/TOML files)
//! - SQLite mapping store (r2d2 pool, embedded schema)
//! - Galaxy ERP and OpenCart REST clients
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `erpbridge-core`
//! - Contains all "impure" code (file, database and network I/O)

pub mod config;
pub mod database;
pub mod erp;
pub mod errors;
pub mod http;
pub mod logging;
pub mod storefront;

// Re-export commonly used items
pub use database::*;
pub use erp::ErpClient;
pub use errors::InfraError;
pub use http::*;
pub use logging::init_tracing;
pub use storefront::StorefrontClient;
