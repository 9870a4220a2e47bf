//! Categories Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::categories::{
    data::NewCategory,
    records::{CategoryRecord, CategoryUuid},
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.name)
            .bind(&category.slug)
            .bind(&category.icon)
            .fetch_one(&mut **tx)
            .await
    }
}

/// A category joined through a store or coupon link table, aliased as
/// `owner_uuid`.
#[derive(Debug, Clone)]
pub(crate) struct OwnedCategory {
    pub(crate) owner: Uuid,
    pub(crate) category: CategoryRecord,
}

/// Group linked categories by owner, keeping the query's ordering.
pub(crate) fn group_by_owner(rows: Vec<OwnedCategory>) -> FxHashMap<Uuid, Vec<CategoryRecord>> {
    let mut grouped: FxHashMap<Uuid, Vec<CategoryRecord>> = FxHashMap::default();

    for row in rows {
        grouped.entry(row.owner).or_default().push(row.category);
    }

    grouped
}

impl<'r> FromRow<'r, PgRow> for OwnedCategory {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            owner: row.try_get("owner_uuid")?,
            category: CategoryRecord::from_row(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            icon: row.try_get("icon")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
