//! Key/value store for cursors carried between runs.

use std::sync::Arc;

use async_trait::async_trait;
use erpbridge_core::SyncStateRepository;
use erpbridge_domain::Result as DomainResult;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;

use super::category_mapping_repository::map_join_error;
use super::manager::{map_sql_error, DbManager};

/// SQLite-backed sync state repository
pub struct SqliteSyncStateRepository {
    db: Arc<DbManager>,
}

impl SqliteSyncStateRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SyncStateRepository for SqliteSyncStateRepository {
    async fn get_value(&self, key: &str) -> DomainResult<Option<String>> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<String>> {
            let conn = db.get_connection()?;
            query_value(&conn, &key).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_value(&self, key: &str, value: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();
        let value = value.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            upsert_value(&conn, &key, &value).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn query_value(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row("SELECT value FROM sync_state WHERE key = ?1", params![key], |row| row.get(0))
        .optional()
}

fn upsert_value(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO sync_state (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, chrono::Utc::now().timestamp()],
    )?;
    Ok(())
}
