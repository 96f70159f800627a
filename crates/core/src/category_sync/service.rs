//! Category sync service - two-phase create/link workflow

use std::sync::Arc;

use erpbridge_domain::{CategoryMapping, ErpCategory, MappingSnapshot, Result};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use super::transform;
use crate::erp_ports::ErpGateway;
use crate::storefront_ports::StorefrontGateway;
use crate::sync::{open_session, CategoryMappingRepository, ErpCredentials};

/// Outcome counters for one category sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategorySyncReport {
    pub fetched: usize,
    pub created: usize,
    pub skipped_existing: usize,
    pub creation_failures: usize,
    pub linked: usize,
    pub unlinked: usize,
    pub link_failures: usize,
}

/// Mirrors the ERP category forest into the storefront.
///
/// Phase 1 creates every unmapped category flat (parent = root) and records
/// the storefront id. Phase 2 reloads the mappings and sets each child's
/// parent. Input order never matters because no link is attempted until
/// every creation has been committed.
pub struct CategorySyncService {
    erp: Arc<dyn ErpGateway>,
    storefront: Arc<dyn StorefrontGateway>,
    mappings: Arc<dyn CategoryMappingRepository>,
    credentials: ErpCredentials,
}

impl CategorySyncService {
    pub fn new(
        erp: Arc<dyn ErpGateway>,
        storefront: Arc<dyn StorefrontGateway>,
        mappings: Arc<dyn CategoryMappingRepository>,
        credentials: ErpCredentials,
    ) -> Self {
        Self { erp, storefront, mappings, credentials }
    }

    /// Authenticate, fetch the ERP categories and sync them.
    ///
    /// Authentication and fetch failures abort the run. Individual create or
    /// link failures are logged and counted in the report.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<CategorySyncReport> {
        info!("starting category sync");

        let session = open_session(self.erp.as_ref(), &self.credentials).await?;

        let categories = self.erp.fetch_categories(&session).await.map_err(|err| {
            error!(error = %err, "failed to fetch categories from ERP");
            err
        })?;
        info!(count = categories.len(), "fetched categories from ERP");

        let report = self.sync_categories(&categories).await?;

        info!(
            fetched = report.fetched,
            created = report.created,
            skipped_existing = report.skipped_existing,
            creation_failures = report.creation_failures,
            linked = report.linked,
            unlinked = report.unlinked,
            link_failures = report.link_failures,
            "categories synchronization completed"
        );

        Ok(report)
    }

    /// Run both phases over an already fetched category list.
    pub async fn sync_categories(&self, categories: &[ErpCategory]) -> Result<CategorySyncReport> {
        let mut report = CategorySyncReport { fetched: categories.len(), ..Default::default() };

        if categories.is_empty() {
            debug!("no categories to sync");
            return Ok(report);
        }

        self.create_missing(categories, &mut report).await?;
        self.link_parents(categories, &mut report).await?;

        Ok(report)
    }

    /// Phase 1: create every unmapped category with a root parent.
    async fn create_missing(
        &self,
        categories: &[ErpCategory],
        report: &mut CategorySyncReport,
    ) -> Result<()> {
        let snapshot = self.load_snapshot().await?;

        for category in categories {
            // Checked against the store, not the snapshot, so a duplicate id
            // later in the same list sees the mapping created above it.
            if self.mappings.exists(&category.id).await? {
                debug!(erp_id = %category.id, "category already exists in storefront; skipping");
                report.skipped_existing += 1;
                continue;
            }

            let payload = transform::to_payload(category, &snapshot, false);

            match self.storefront.create_category(&payload).await {
                Ok(opencart_id) => {
                    self.mappings.create(&CategoryMapping::new(&category.id, opencart_id)).await?;
                    info!(
                        erp_id = %category.id,
                        opencart_id,
                        name = payload.name(),
                        "category initially created in storefront"
                    );
                    report.created += 1;
                }
                Err(err) => {
                    error!(
                        erp_id = %category.id,
                        name = payload.name(),
                        error = %err,
                        "error creating category in storefront"
                    );
                    report.creation_failures += 1;
                }
            }
        }

        Ok(())
    }

    /// Phase 2: point every child at its parent's storefront id.
    async fn link_parents(
        &self,
        categories: &[ErpCategory],
        report: &mut CategorySyncReport,
    ) -> Result<()> {
        let snapshot = self.load_snapshot().await?;

        for category in categories {
            let Some(parent_erp_id) = category.parent_node_id.as_deref() else {
                continue;
            };

            let Some(link) = transform::parent_link(category, &snapshot) else {
                debug!(erp_id = %category.id, parent_erp_id, "parent has no mapping; leaving unlinked");
                report.unlinked += 1;
                continue;
            };

            let Some(category_id) = snapshot.get(&category.id) else {
                debug!(erp_id = %category.id, "category has no mapping; leaving unlinked");
                report.unlinked += 1;
                continue;
            };

            match self.storefront.link_category_parent(category_id, link).await {
                Ok(()) => {
                    info!(
                        erp_id = %category.id,
                        opencart_id = category_id,
                        parent_id = link.parent_id,
                        "updated category parent in storefront"
                    );
                    report.linked += 1;
                }
                Err(err) => {
                    error!(
                        erp_id = %category.id,
                        opencart_id = category_id,
                        error = %err,
                        "error updating category parent in storefront"
                    );
                    report.link_failures += 1;
                }
            }
        }

        Ok(())
    }

    async fn load_snapshot(&self) -> Result<MappingSnapshot> {
        Ok(self.mappings.load_all().await?.into_iter().collect())
    }
}
