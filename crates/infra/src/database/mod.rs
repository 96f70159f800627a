//! Database implementations

pub mod category_mapping_repository;
pub mod manager;
pub mod sync_state_repository;

pub use category_mapping_repository::*;
pub use manager::*;
pub use sync_state_repository::*;
