//! OpenCart storefront integration

pub mod client;

pub use client::StorefrontClient;
