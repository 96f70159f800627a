//! # erpbridge domain
//!
//! Business domain types for the ERP ↔ storefront bridge.
//!
//! This crate contains:
//! - ERP and storefront record shapes
//! - Domain error type and Result alias
//! - Configuration structures
//! - Policy constants shared by every sync
//!
//! ## Architecture
//! - No dependencies on other erpbridge crates
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
