//! Coupons Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{try_get_parsed, try_get_parsed_opt, try_get_u64, try_i64},
    domain::{
        categories::{
            records::CategoryUuid,
            repository::{OwnedCategory, group_by_owner},
        },
        coupons::{
            data::{CashbackOffer, CouponFilter, CouponUpdate, Discount, NewCoupon},
            records::{CouponRecord, CouponStore, CouponUsage, CouponUuid},
        },
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
    uuids::into_uuids,
};

const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const SEARCH_COUPONS_SQL: &str = include_str!("sql/search_coupons.sql");
const LIST_POPULAR_COUPONS_SQL: &str = include_str!("sql/list_popular_coupons.sql");
const LIST_NEW_COUPONS_SQL: &str = include_str!("sql/list_new_coupons.sql");
const LIST_EXPIRING_SOON_COUPONS_SQL: &str = include_str!("sql/list_expiring_soon_coupons.sql");
const LIST_STORE_COUPONS_SQL: &str = include_str!("sql/list_store_coupons.sql");
const LIST_CATEGORY_COUPONS_SQL: &str = include_str!("sql/list_category_coupons.sql");
const LIST_SAVED_COUPONS_SQL: &str = include_str!("sql/list_saved_coupons.sql");
const GET_COUPON_SQL: &str = include_str!("sql/get_coupon.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/update_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/delete_coupon.sql");
const ATTACH_COUPON_CATEGORIES_SQL: &str = include_str!("sql/attach_coupon_categories.sql");
const DETACH_COUPON_CATEGORIES_SQL: &str = include_str!("sql/detach_coupon_categories.sql");
const LIST_COUPON_CATEGORIES_SQL: &str = include_str!("sql/list_coupon_categories.sql");
const TRACK_COUPON_USE_SQL: &str = include_str!("sql/track_coupon_use.sql");
const REFRESH_EXPIRING_SOON_SQL: &str = include_str!("sql/refresh_expiring_soon.sql");

/// Which pre-sorted selector to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CouponSelector {
    Popular,
    New,
    ExpiringSoon,
}

impl CouponSelector {
    const fn sql(self) -> &'static str {
        match self {
            Self::Popular => LIST_POPULAR_COUPONS_SQL,
            Self::New => LIST_NEW_COUPONS_SQL,
            Self::ExpiringSoon => LIST_EXPIRING_SOON_COUPONS_SQL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "coupons.repository.list_coupons",
        skip(self, tx, filter),
        fields(coupon_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &CouponFilter,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        let coupons = query_as::<Postgres, CouponRecord>(LIST_COUPONS_SQL)
            .bind(filter.category.map(CategoryUuid::into_uuid))
            .bind(filter.store.map(StoreUuid::into_uuid))
            .bind(filter.search_pattern())
            .bind(filter.popular)
            .bind(filter.new)
            .bind(filter.expiring_soon)
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("coupon_count", coupons.len());

        self.with_categories(tx, coupons).await
    }

    pub(crate) async fn search_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pattern: &str,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        let coupons = query_as::<Postgres, CouponRecord>(SEARCH_COUPONS_SQL)
            .bind(pattern)
            .fetch_all(&mut **tx)
            .await?;

        self.with_categories(tx, coupons).await
    }

    pub(crate) async fn list_selected_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        selector: CouponSelector,
        limit: u64,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        let coupons = query_as::<Postgres, CouponRecord>(selector.sql())
            .bind(try_i64(limit, "limit")?)
            .fetch_all(&mut **tx)
            .await?;

        self.with_categories(tx, coupons).await
    }

    pub(crate) async fn list_store_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreUuid,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        let coupons = query_as::<Postgres, CouponRecord>(LIST_STORE_COUPONS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.with_categories(tx, coupons).await
    }

    pub(crate) async fn list_category_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        let coupons = query_as::<Postgres, CouponRecord>(LIST_CATEGORY_COUPONS_SQL)
            .bind(category.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.with_categories(tx, coupons).await
    }

    pub(crate) async fn list_saved_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        let coupons = query_as::<Postgres, CouponRecord>(LIST_SAVED_COUPONS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.with_categories(tx, coupons).await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<CouponRecord, sqlx::Error> {
        let coupon = query_as::<Postgres, CouponRecord>(GET_COUPON_SQL)
            .bind(coupon.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut coupons = self.with_categories(tx, vec![coupon]).await?;

        coupons.pop().ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: &NewCoupon,
    ) -> Result<(), sqlx::Error> {
        let cashback = coupon.cashback.as_ref();

        query(CREATE_COUPON_SQL)
            .bind(coupon.uuid.into_uuid())
            .bind(coupon.store.into_uuid())
            .bind(&coupon.title)
            .bind(&coupon.description)
            .bind(&coupon.code)
            .bind(coupon.discount.kind.as_str())
            .bind(coupon.discount.value)
            .bind(SqlxTimestamp::from(coupon.expiry_date))
            .bind(coupon.terms.as_deref())
            .bind(coupon.url.as_deref())
            .bind(cashback.map(|offer| offer.available))
            .bind(cashback.map(|offer| offer.value))
            .bind(cashback.map(|offer| offer.kind.as_str()))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Apply a partial update. Returns the number of rows touched.
    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        update: &CouponUpdate,
    ) -> Result<u64, sqlx::Error> {
        let cashback = update.cashback.as_ref();

        let rows_affected = query(UPDATE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(update.title.as_deref())
            .bind(update.description.as_deref())
            .bind(update.code.as_deref())
            .bind(update.discount.map(|discount| discount.kind.as_str()))
            .bind(update.discount.map(|discount| discount.value))
            .bind(update.store.map(StoreUuid::into_uuid))
            .bind(update.expiry_date.map(SqlxTimestamp::from))
            .bind(update.terms.as_deref())
            .bind(update.url.as_deref())
            .bind(cashback.is_some())
            .bind(cashback.map(|offer| offer.available))
            .bind(cashback.map(|offer| offer.value))
            .bind(cashback.map(|offer| offer.kind.as_str()))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Replace the coupon's category set with whichever of `categories` exist.
    #[tracing::instrument(
        name = "coupons.repository.replace_categories",
        skip(self, tx, categories),
        fields(
            coupon_uuid = %coupon,
            requested_count = categories.len(),
            attached_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn replace_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        categories: &[CategoryUuid],
    ) -> Result<u64, sqlx::Error> {
        query(DETACH_COUPON_CATEGORIES_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?;

        if categories.is_empty() {
            return Ok(0);
        }

        let attached_count = query(ATTACH_COUPON_CATEGORIES_SQL)
            .bind(coupon.into_uuid())
            .bind(into_uuids(categories))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        tracing::Span::current().record("attached_count", attached_count);

        if attached_count < categories.len() as u64 {
            debug!(
                attached_count,
                requested_count = categories.len(),
                "skipped unknown coupon categories"
            );
        }

        Ok(attached_count)
    }

    /// Count one redemption and promote to popular past `threshold` uses.
    pub(crate) async fn track_use(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        threshold: u64,
    ) -> Result<CouponUsage, sqlx::Error> {
        query_as::<Postgres, CouponUsage>(TRACK_COUPON_USE_SQL)
            .bind(coupon.into_uuid())
            .bind(try_i64(threshold, "threshold")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Recompute `is_expiring_soon` for every coupon whose flag is stale.
    pub(crate) async fn refresh_expiring_soon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
        window_end: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REFRESH_EXPIRING_SOON_SQL)
            .bind(SqlxTimestamp::from(now))
            .bind(SqlxTimestamp::from(window_end))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn with_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut coupons: Vec<CouponRecord>,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        if coupons.is_empty() {
            return Ok(coupons);
        }

        let coupon_uuids: Vec<Uuid> = coupons
            .iter()
            .map(|coupon| coupon.uuid.into_uuid())
            .collect();

        let rows = query_as::<Postgres, OwnedCategory>(LIST_COUPON_CATEGORIES_SQL)
            .bind(&coupon_uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped = group_by_owner(rows);

        for coupon in &mut coupons {
            coupon.categories = grouped
                .remove(&coupon.uuid.into_uuid())
                .unwrap_or_default();
        }

        Ok(coupons)
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let cashback = match try_get_parsed_opt(row, "cashback_type")? {
            Some(kind) => Some(CashbackOffer {
                available: row.try_get("cashback_available")?,
                value: row.try_get("cashback_value")?,
                kind,
            }),
            None => None,
        };

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            code: row.try_get("code")?,
            discount: Discount {
                kind: try_get_parsed(row, "discount_type")?,
                value: row.try_get("discount_value")?,
            },
            store: CouponStore {
                uuid: StoreUuid::from_uuid(row.try_get("store_uuid")?),
                name: row.try_get("store_name")?,
                logo: row.try_get("store_logo")?,
                website: row.try_get("store_website")?,
            },
            categories: Vec::new(),
            expiry_date: row.try_get::<SqlxTimestamp, _>("expiry_date")?.to_jiff(),
            terms: row.try_get("terms")?,
            url: row.try_get("url")?,
            is_verified: row.try_get("is_verified")?,
            success_rate: row.try_get("success_rate")?,
            used_count: try_get_u64(row, "used_count")?,
            is_popular: row.try_get("is_popular")?,
            is_new: row.try_get("is_new")?,
            is_expiring_soon: row.try_get("is_expiring_soon")?,
            cashback,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CouponUsage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            used_count: try_get_u64(row, "used_count")?,
            is_popular: row.try_get("is_popular")?,
        })
    }
}
