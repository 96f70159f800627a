//! erpbridge - Galaxy ERP to OpenCart batch synchronisation
//!
//! Usage: `erpbridge [categories|balances|images|products|orders|all]`

mod context;
mod jobs;

use anyhow::Context as _;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::jobs::Job;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();

    erpbridge_infra::init_tracing()?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "could not load .env file"),
    }

    let job = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Job>()?,
        None => Job::default(),
    };

    let config = erpbridge_infra::config::load().context("failed to load configuration")?;
    let ctx = AppContext::new(config).context("failed to initialise application context")?;

    info!(job = %job, "erpbridge starting");
    jobs::run(&ctx, job).await.with_context(|| format!("job '{job}' failed"))?;

    Ok(())
}
