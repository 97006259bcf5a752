use std::sync::Arc;

use crate::{
    models::Note,
    store::{Key, KvStore, StoreError},
};

/// Namespace every note record lives under.
pub const NOTES_NAMESPACE: &str = "notes";

/// Note records over a shared key-value store.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KvStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn key(id: &str) -> Key {
        Key::new(NOTES_NAMESPACE, id)
    }

    pub async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        let records = self.store.list(NOTES_NAMESPACE).await?;

        Ok(records.into_iter().map(|(key, _)| key.id).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Note>, StoreError> {
        let body = self.store.get(&Self::key(id)).await?;

        Ok(body.map(|body| Note {
            id: id.to_string(),
            body,
        }))
    }

    pub async fn set(&self, id: &str, body: &str) -> Result<(), StoreError> {
        self.store.set(&Self::key(id), body).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(&Self::key(id)).await
    }
}
