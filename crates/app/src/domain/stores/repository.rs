//! Stores Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{try_get_u64, try_i64},
    domain::{
        categories::{
            records::CategoryUuid,
            repository::{OwnedCategory, group_by_owner},
        },
        stores::{
            data::NewStore,
            records::{StoreRecord, StoreUuid},
        },
    },
    uuids::into_uuids,
};

const LIST_STORES_SQL: &str = include_str!("sql/list_stores.sql");
const LIST_POPULAR_STORES_SQL: &str = include_str!("sql/list_popular_stores.sql");
const GET_STORE_SQL: &str = include_str!("sql/get_store.sql");
const LOCK_STORE_SQL: &str = include_str!("sql/lock_store.sql");
const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");
const ATTACH_STORE_CATEGORIES_SQL: &str = include_str!("sql/attach_store_categories.sql");
const LIST_STORE_CATEGORIES_SQL: &str = include_str!("sql/list_store_categories.sql");
const REFRESH_COUPON_COUNT_SQL: &str = include_str!("sql/refresh_coupon_count.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStoresRepository;

impl PgStoresRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        let stores = query_as::<Postgres, StoreRecord>(LIST_STORES_SQL)
            .fetch_all(&mut **tx)
            .await?;

        self.with_categories(tx, stores).await
    }

    pub(crate) async fn list_popular_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u64,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        let stores = query_as::<Postgres, StoreRecord>(LIST_POPULAR_STORES_SQL)
            .bind(try_i64(limit, "limit")?)
            .fetch_all(&mut **tx)
            .await?;

        self.with_categories(tx, stores).await
    }

    pub(crate) async fn get_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<StoreRecord, sqlx::Error> {
        let store = query_as::<Postgres, StoreRecord>(GET_STORE_SQL)
            .bind(store.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut stores = self.with_categories(tx, vec![store]).await?;

        stores.pop().ok_or(sqlx::Error::RowNotFound)
    }

    /// Lock the store row for the rest of the transaction.
    ///
    /// Returns `false` when the store does not exist.
    pub(crate) async fn lock_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<bool, sqlx::Error> {
        let locked: Option<Uuid> = query_scalar(LOCK_STORE_SQL)
            .bind(store.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(locked.is_some())
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: &NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(&store.name)
            .bind(&store.logo)
            .bind(&store.website)
            .bind(store.is_popular)
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "stores.repository.attach_categories",
        skip(self, tx, categories),
        fields(
            store_uuid = %store,
            requested_count = categories.len(),
            attached_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn attach_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
        categories: &[CategoryUuid],
    ) -> Result<u64, sqlx::Error> {
        if categories.is_empty() {
            return Ok(0);
        }

        let attached_count = query(ATTACH_STORE_CATEGORIES_SQL)
            .bind(store.into_uuid())
            .bind(into_uuids(categories))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        tracing::Span::current().record("attached_count", attached_count);

        debug!(attached_count, "attached store categories");

        Ok(attached_count)
    }

    /// Recount the coupons pointing at a store and store the result.
    pub(crate) async fn refresh_coupon_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<u64, sqlx::Error> {
        let coupon_count: i64 = query_scalar(REFRESH_COUPON_COUNT_SQL)
            .bind(store.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(coupon_count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "coupon_count".to_string(),
            source: Box::new(e),
        })
    }

    async fn with_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut stores: Vec<StoreRecord>,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        if stores.is_empty() {
            return Ok(stores);
        }

        let store_uuids: Vec<Uuid> = stores.iter().map(|store| store.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OwnedCategory>(LIST_STORE_CATEGORIES_SQL)
            .bind(&store_uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped = group_by_owner(rows);

        for store in &mut stores {
            store.categories = grouped.remove(&store.uuid.into_uuid()).unwrap_or_default();
        }

        Ok(stores)
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            logo: row.try_get("logo")?,
            website: row.try_get("website")?,
            coupon_count: try_get_u64(row, "coupon_count")?,
            is_popular: row.try_get("is_popular")?,
            categories: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
