use async_trait::async_trait;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_postgres::{Client, NoTls};

use super::{Key, KvStore, StoreError, embedded::migrations};

/// Ids and values are stored as UTF-8 bytes.
fn text(bytes: Vec<u8>) -> Result<String, StoreError> {
    Ok(String::from_utf8(bytes)?)
}

/// Key-value records kept in a single postgres table.
pub struct PostgresStore {
    client: Client,
    connection: Mutex<Option<JoinHandle<()>>>,
}

impl PostgresStore {
    /// Connects to `database_dsn` and brings the schema up to date.
    pub async fn connect(database_dsn: &str) -> Result<Self, StoreError> {
        let (mut client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        let connection = tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        let migrations_report = migrations::runner().run_async(&mut client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(Self {
            client,
            connection: Mutex::new(Some(connection)),
        })
    }
}

#[async_trait]
impl KvStore for PostgresStore {
    async fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT value FROM kv WHERE namespace = $1 AND id = $2",
                &[&key.namespace, &key.id.as_bytes()],
            )
            .await?;

        row.map(|row| text(row.get("value"))).transpose()
    }

    async fn set(&self, key: &Key, value: &str) -> Result<(), StoreError> {
        self.client
            .execute(
                "INSERT INTO kv (namespace, id, value) VALUES ($1, $2, $3) \
                 ON CONFLICT (namespace, id) DO UPDATE SET value = EXCLUDED.value",
                &[&key.namespace, &key.id.as_bytes(), &value.as_bytes()],
            )
            .await?;

        Ok(())
    }

    async fn delete(&self, key: &Key) -> Result<(), StoreError> {
        self.client
            .execute(
                "DELETE FROM kv WHERE namespace = $1 AND id = $2",
                &[&key.namespace, &key.id.as_bytes()],
            )
            .await?;

        Ok(())
    }

    async fn list(&self, namespace: &str) -> Result<Vec<(Key, String)>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, value FROM kv WHERE namespace = $1 ORDER BY id",
                &[&namespace],
            )
            .await?;

        rows.into_iter()
            .map(|row| -> Result<(Key, String), StoreError> {
                let id = text(row.get("id"))?;
                Ok((Key::new(namespace, id), text(row.get("value"))?))
            })
            .collect()
    }

    async fn close(&self) -> Result<(), StoreError> {
        if let Some(connection) = self.connection.lock().await.take() {
            // Dropping the driver future closes the socket.
            connection.abort();
            let _ = connection.await;
            tracing::info!("Database connection closed");
        }

        Ok(())
    }
}
