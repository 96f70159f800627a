//! In-memory repository implementations for testing

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use erpbridge_core::{CategoryMappingRepository, SyncStateRepository};
use erpbridge_domain::{BridgeError, CategoryMapping, Result as DomainResult};

/// Mapping store that enforces the same uniqueness as the SQLite table.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    mappings: Mutex<BTreeMap<String, CategoryMapping>>,
    /// Reject every `create` with `Conflict` while `exists` still says no,
    /// as a concurrent run inserting the same id would.
    pub conflict_on_create: bool,
}

impl InMemoryMappingRepository {
    pub fn seeded(entries: &[(&str, i64)]) -> Self {
        let repo = Self::default();
        {
            let mut mappings = repo.mappings.lock().expect("lock");
            for (erp_id, opencart_id) in entries {
                mappings.insert((*erp_id).to_string(), CategoryMapping::new(*erp_id, *opencart_id));
            }
        }
        repo
    }

    pub fn conflicting() -> Self {
        Self { conflict_on_create: true, ..Self::default() }
    }

    pub fn get(&self, erp_id: &str) -> Option<i64> {
        self.mappings.lock().expect("lock").get(erp_id).map(|m| m.opencart_id)
    }

    pub fn len(&self) -> usize {
        self.mappings.lock().expect("lock").len()
    }
}

#[async_trait]
impl CategoryMappingRepository for InMemoryMappingRepository {
    async fn load_all(&self) -> DomainResult<Vec<CategoryMapping>> {
        Ok(self.mappings.lock().expect("lock").values().cloned().collect())
    }

    async fn exists(&self, erp_id: &str) -> DomainResult<bool> {
        Ok(self.mappings.lock().expect("lock").contains_key(erp_id))
    }

    async fn create(&self, mapping: &CategoryMapping) -> DomainResult<()> {
        let mut mappings = self.mappings.lock().expect("lock");
        if self.conflict_on_create || mappings.contains_key(&mapping.erp_id) {
            return Err(BridgeError::Conflict(format!("{} is already mapped", mapping.erp_id)));
        }
        mappings.insert(mapping.erp_id.clone(), mapping.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySyncState {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySyncState {
    pub fn with_value(key: &str, value: &str) -> Self {
        let state = Self::default();
        state.values.lock().expect("lock").insert(key.to_string(), value.to_string());
        state
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().expect("lock").get(key).cloned()
    }
}

#[async_trait]
impl SyncStateRepository for InMemorySyncState {
    async fn get_value(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.values.lock().expect("lock").get(key).cloned())
    }

    async fn set_value(&self, key: &str, value: &str) -> DomainResult<()> {
        self.values.lock().expect("lock").insert(key.to_string(), value.to_string());
        Ok(())
    }
}
