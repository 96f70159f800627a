//! Tracing subscriber setup
//!
//! Log level comes from `RUST_LOG` (default `info`). Set
//! `ERPBRIDGE_LOG_JSON=1` to emit one JSON object per line.

use erpbridge_domain::{BridgeError, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::config::loader::env_bool;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// Fails with `BridgeError::Internal` if a subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    let installed = if env_bool("ERPBRIDGE_LOG_JSON", false) {
        fmt().json().with_env_filter(filter).with_target(true).try_init()
    } else {
        fmt().with_env_filter(filter).with_target(false).try_init()
    };

    installed.map_err(|err| BridgeError::Internal(format!("failed to install tracing subscriber: {err}")))
}

fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
