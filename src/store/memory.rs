use async_trait::async_trait;
use tokio::sync::RwLock;

use std::collections::BTreeMap;

use super::{Key, KvStore, StoreError};

/// Ordered in-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<Key, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &Key, value: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(key.clone(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &Key) -> Result<(), StoreError> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn list(&self, namespace: &str) -> Result<Vec<(Key, String)>, StoreError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|(key, _)| key.namespace == namespace)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
