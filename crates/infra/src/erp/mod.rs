//! Galaxy ERP integration

pub mod client;

pub use client::ErpClient;
