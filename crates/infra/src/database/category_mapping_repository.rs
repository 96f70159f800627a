//! Category mapping repository
//!
//! Persists ERP category id -> storefront category id pairs.

use std::sync::Arc;

use async_trait::async_trait;
use erpbridge_core::CategoryMappingRepository;
use erpbridge_domain::{BridgeError, CategoryMapping, Result as DomainResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed category mapping repository
pub struct SqliteCategoryMappingRepository {
    db: Arc<DbManager>,
}

impl SqliteCategoryMappingRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryMappingRepository for SqliteCategoryMappingRepository {
    async fn load_all(&self) -> DomainResult<Vec<CategoryMapping>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<CategoryMapping>> {
            let conn = db.get_connection()?;
            query_all_mappings(&conn).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn exists(&self, erp_id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let erp_id = erp_id.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            query_mapping_exists(&conn, &erp_id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, mapping: &CategoryMapping) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let mapping = mapping.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            insert_mapping(&conn, &mapping).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// SQL Operations (synchronous)
// ============================================================================

fn query_all_mappings(conn: &Connection) -> rusqlite::Result<Vec<CategoryMapping>> {
    let mut stmt = conn.prepare(
        "SELECT erp_id, opencart_id, created_at FROM category_mapping ORDER BY created_at, erp_id",
    )?;
    let rows = stmt.query_map([], map_mapping_row)?;
    rows.collect()
}

fn query_mapping_exists(conn: &Connection, erp_id: &str) -> rusqlite::Result<bool> {
    conn.query_row("SELECT 1 FROM category_mapping WHERE erp_id = ?1", params![erp_id], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
}

fn insert_mapping(conn: &Connection, mapping: &CategoryMapping) -> rusqlite::Result<()> {
    // Plain INSERT: an existing erp_id must surface as a constraint violation.
    conn.execute(
        "INSERT INTO category_mapping (erp_id, opencart_id, created_at) VALUES (?1, ?2, ?3)",
        params![&mapping.erp_id, mapping.opencart_id, mapping.created_at],
    )?;
    Ok(())
}

fn map_mapping_row(row: &Row<'_>) -> rusqlite::Result<CategoryMapping> {
    Ok(CategoryMapping { erp_id: row.get(0)?, opencart_id: row.get(1)?, created_at: row.get(2)? })
}

pub(crate) fn map_join_error(err: task::JoinError) -> BridgeError {
    if err.is_cancelled() {
        BridgeError::Internal("blocking database task cancelled".into())
    } else {
        BridgeError::Internal(format!("blocking database task failed: {err}"))
    }
}
