//! Key-value persistence behind the notes pages.
//!
//! Records are addressed by a two-part [`Key`]: a namespace and an id within
//! it. Backends only promise what a plain key-value store promises: point
//! reads and writes, deletes, and listing one namespace in key order.

mod embedded;
mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("failed to migrate database: {0}")]
    Migration(#[from] refinery::Error),

    #[error("stored text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Composite record key, `(namespace, id)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    pub namespace: String,
    pub id: String,
}

impl Key {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &Key) -> Result<Option<String>, StoreError>;

    /// Create or replace the value stored under `key`.
    async fn set(&self, key: &Key, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &Key) -> Result<(), StoreError>;

    /// All records of one namespace, ordered by id.
    async fn list(&self, namespace: &str) -> Result<Vec<(Key, String)>, StoreError>;

    /// Release the backend's resources. Called once at shutdown.
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
