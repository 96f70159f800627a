//! # erpbridge Core
//!
//! Pure sync logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the ERP, the storefront and local persistence
//! - The sync services that drive them
//!
//! ## Architecture Principles
//! - Only depends on `erpbridge-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Calls are awaited one at a time; a run never overlaps its own requests

pub mod balance_sync;
pub mod category_sync;
pub mod image_sync;
pub mod order_sync;
pub mod product_sync;
pub mod sync;

// External system ports
pub mod erp_ports;
pub mod storefront_ports;

pub use balance_sync::{BalanceSyncReport, BalanceSyncService};
pub use category_sync::{CategorySyncReport, CategorySyncService};
pub use erp_ports::ErpGateway;
pub use image_sync::{ImageSyncReport, ImageSyncService};
pub use order_sync::{OrderSyncReport, OrderSyncService};
pub use product_sync::{ProductSyncReport, ProductSyncService};
pub use storefront_ports::StorefrontGateway;
pub use sync::{open_session, CategoryMappingRepository, ErpCredentials, SyncStateRepository};
