#![allow(dead_code)]

use std::sync::Arc;

use erpbridge_infra::database::DbManager;
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("bridge.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema migrations should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    /// Count rows in `table`.
    pub fn count(&self, table: &str) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("count query should succeed")
    }

    /// Storefront id stored for `erp_id`, if any.
    pub fn mapped_id(&self, erp_id: &str) -> Option<i64> {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(
            "SELECT opencart_id FROM category_mapping WHERE erp_id = ?1",
            [erp_id],
            |row| row.get(0),
        )
        .ok()
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}
