//! Job selection and dispatch

use std::fmt;
use std::str::FromStr;

use erpbridge_domain::{BridgeError, Result};
use serde_json::Value;
use tracing::{error, info};

use crate::context::AppContext;

/// One sync workflow, chosen by the first command-line argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Job {
    #[default]
    Categories,
    Balances,
    Images,
    Products,
    Orders,
    All,
}

/// Execution order for `all`: products need fresh category mappings and
/// images need the products to exist.
const ALL_JOBS: [Job; 5] = [Job::Categories, Job::Products, Job::Balances, Job::Images, Job::Orders];

impl Job {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Balances => "balances",
            Self::Images => "images",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::All => "all",
        }
    }

    /// Jobs actually executed for this selection.
    pub fn expand(self) -> Vec<Job> {
        match self {
            Self::All => ALL_JOBS.to_vec(),
            single => vec![single],
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Job {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "categories" => Ok(Self::Categories),
            "balances" => Ok(Self::Balances),
            "images" => Ok(Self::Images),
            "products" => Ok(Self::Products),
            "orders" => Ok(Self::Orders),
            "all" => Ok(Self::All),
            other => Err(BridgeError::InvalidInput(format!(
                "unknown job '{other}' (expected categories, balances, images, products, orders or all)"
            ))),
        }
    }
}

/// Run the selected job(s).
///
/// With `all`, a failing job is logged and the remaining jobs still run; the
/// first error is returned once every job has finished.
pub async fn run(ctx: &AppContext, job: Job) -> Result<()> {
    let mut first_error = None;

    for job in job.expand() {
        info!(job = %job, "job started");
        match run_single(ctx, job).await {
            Ok(report) => info!(job = %job, report = %report, "job finished"),
            Err(err) => {
                error!(job = %job, kind = err.label(), error = %err, "job failed");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

async fn run_single(ctx: &AppContext, job: Job) -> Result<Value> {
    let report = match job {
        Job::Categories => serde_json::to_value(ctx.category_sync().run().await?),
        Job::Balances => serde_json::to_value(ctx.balance_sync().run().await?),
        Job::Images => serde_json::to_value(ctx.image_sync().run().await?),
        Job::Products => serde_json::to_value(ctx.product_sync().run().await?),
        Job::Orders => serde_json::to_value(ctx.order_sync().run().await?),
        Job::All => return Err(BridgeError::Internal("'all' must be expanded before dispatch".into())),
    };

    report.map_err(|err| BridgeError::Internal(format!("failed to render job report: {err}")))
}
