//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod seed;

pub use in_memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::{PostgresStore, ensure_schema};
pub use seed::seed_sample_data;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::store::Store;
use anyhow::Result;
use std::sync::Arc;

/// Open the store selected by the configuration
///
/// The PostgreSQL backend also applies the schema.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn Store>> {
    match config.backend {
        StorageBackend::InMemory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("storage.database_url is required"))?;
            let store = PostgresStore::connect(url, config.max_connections).await?;
            ensure_schema(store.pool()).await?;
            tracing::info!("Connected to PostgreSQL store");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres => Err(anyhow::anyhow!(
            "the postgres backend requires building with the `postgres` feature"
        )),
    }
}
