mod car_repo;
mod errors;
mod memory_repo;

pub use car_repo::PgCarStore;
pub use errors::StoreError;
pub use memory_repo::MemoryCarStore;

use crate::constants::{API_NAME, MEMORY_DATABASE_URL};
use crate::models::{Car, CarDocument, CarPatch};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Equality filters plus the page window of a car listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarQuery {
    pub filters: BTreeMap<String, String>,
    pub offset: u64,
    pub limit: u64,
}

/// Document store over the `cars` collection.
#[async_trait]
pub trait CarStore: Send + Sync + 'static {
    /// Inserts a new document and returns the stored record with its assigned id.
    async fn create(&self, document: CarDocument) -> Result<Car, StoreError>;

    /// Records whose fields equal every filter value, restricted to the query window.
    async fn find(&self, query: &CarQuery) -> Result<Vec<Car>, StoreError>;

    /// Number of records in the collection, ignoring any filter.
    async fn count(&self) -> Result<u64, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, StoreError>;

    /// Merges `patch` into the stored document and returns the updated record,
    /// or `None` when no record has this id.
    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        patch: &CarPatch,
    ) -> Result<Option<Car>, StoreError>;
}

/// Opens the store named by `database_url`: the in-memory store for `memory://`,
/// PostgreSQL otherwise.
pub async fn connect(database_url: &str) -> anyhow::Result<Arc<dyn CarStore>> {
    if database_url == MEMORY_DATABASE_URL {
        tracing::info!("{} Using in-memory car store", API_NAME);
        return Ok(Arc::new(MemoryCarStore::new()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("{} Connected to database", API_NAME);

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("{} Database migrations completed", API_NAME);

    Ok(Arc::new(PgCarStore::new(pool)))
}
