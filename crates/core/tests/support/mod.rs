//! Shared test helpers for `erpbridge-core` integration tests.
//!
//! In-memory fakes for every port so the sync services can be driven end to
//! end without HTTP or SQLite.

#![allow(dead_code)]

pub mod gateways;
pub mod repositories;

use erpbridge_core::ErpCredentials;
use erpbridge_domain::ErpCategory;

pub fn credentials() -> ErpCredentials {
    ErpCredentials::new("sync", "secret")
}

pub fn category(id: &str, parent: Option<&str>) -> ErpCategory {
    ErpCategory {
        id: id.to_string(),
        parent_node_id: parent.map(str::to_string),
        code: format!("{id}1"),
        description: format!("Category {id}"),
    }
}
