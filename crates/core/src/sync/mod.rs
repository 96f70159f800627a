//! Persistence ports and the ERP session helper shared by every sync job

pub mod ports;
pub mod session;

pub use ports::{CategoryMappingRepository, SyncStateRepository};
pub use session::{open_session, ErpCredentials};
