//! Stores service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stores::{
        data::NewStore,
        errors::StoresServiceError,
        records::{StoreRecord, StoreUuid},
        repository::PgStoresRepository,
    },
};

/// Maximum number of stores returned by the popular selector.
pub const POPULAR_STORES_LIMIT: u64 = 12;

#[derive(Debug, Clone)]
pub struct PgStoresService {
    db: Db,
    repository: PgStoresRepository,
}

impl PgStoresService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStoresRepository::new(),
        }
    }
}

#[async_trait]
impl StoresService for PgStoresService {
    async fn list_stores(&self) -> Result<Vec<StoreRecord>, StoresServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stores = self.repository.list_stores(&mut tx).await?;

        tx.commit().await?;

        Ok(stores)
    }

    async fn list_popular_stores(&self) -> Result<Vec<StoreRecord>, StoresServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stores = self
            .repository
            .list_popular_stores(&mut tx, POPULAR_STORES_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(stores)
    }

    async fn get_store(&self, store: StoreUuid) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let store = self.repository.get_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(store)
    }

    #[tracing::instrument(
        name = "stores.service.create_store",
        skip(self, store),
        fields(store_uuid = %store.uuid, name = %store.name),
        err
    )]
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.create_store(&mut tx, &store).await?;

        self.repository
            .attach_categories(&mut tx, store.uuid, &store.categories)
            .await?;

        let created = self.repository.get_store(&mut tx, store.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Retrieves all stores ordered by name.
    async fn list_stores(&self) -> Result<Vec<StoreRecord>, StoresServiceError>;

    /// Retrieves popular stores, largest catalogue first.
    async fn list_popular_stores(&self) -> Result<Vec<StoreRecord>, StoresServiceError>;

    /// Retrieve a single store with its categories.
    async fn get_store(&self, store: StoreUuid) -> Result<StoreRecord, StoresServiceError>;

    /// Creates a store, attaching whichever of the given categories exist.
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, StoresServiceError>;
}
