//! Category synchronization
//!
//! The ERP category list is a forest with no guaranteed ordering, and the
//! storefront assigns its own ids. Creation and parent linking are therefore
//! split into two passes over the same input (see [`CategorySyncService`]).

pub mod service;
pub mod transform;

pub use service::{CategorySyncReport, CategorySyncService};
