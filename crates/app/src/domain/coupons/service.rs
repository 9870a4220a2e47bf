//! Coupons service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        categories::{records::CategoryUuid, repository::PgCategoriesRepository},
        coupons::{
            data::{CouponFilter, CouponUpdate, NewCoupon, like_contains_pattern},
            errors::CouponsServiceError,
            records::{CategoryCoupons, CouponList, CouponRecord, CouponUsage, CouponUuid, StoreCoupons},
            repository::{CouponSelector, PgCouponsRepository},
        },
        stores::{records::StoreUuid, repository::PgStoresRepository},
    },
};

/// Maximum number of coupons returned by the popular, new and expiring-soon
/// selectors.
pub const SELECTOR_LIMIT: u64 = 12;

/// A coupon becomes popular once its use count exceeds this.
pub const POPULARITY_THRESHOLD: u64 = 50;

/// Coupons expiring within this window of a refresh are flagged as expiring soon.
pub const EXPIRING_SOON_WINDOW: SignedDuration = SignedDuration::from_hours(7 * 24);

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
    stores: PgStoresRepository,
    categories: PgCategoriesRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
            stores: PgStoresRepository::new(),
            categories: PgCategoriesRepository::new(),
        }
    }

    async fn list_selected(
        &self,
        selector: CouponSelector,
    ) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupons = self
            .repository
            .list_selected_coupons(&mut tx, selector, SELECTOR_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(coupons)
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn list_coupons(&self, filter: CouponFilter) -> Result<CouponList, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupons = self.repository.list_coupons(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(coupons.into())
    }

    async fn list_popular_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        self.list_selected(CouponSelector::Popular).await
    }

    async fn list_new_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        self.list_selected(CouponSelector::New).await
    }

    async fn list_expiring_soon_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        self.list_selected(CouponSelector::ExpiringSoon).await
    }

    async fn search_coupons(&self, query: String) -> Result<CouponList, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupons = self
            .repository
            .search_coupons(&mut tx, &like_contains_pattern(&query))
            .await?;

        tx.commit().await?;

        Ok(coupons.into())
    }

    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupon = self.repository.get_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        Ok(coupon)
    }

    async fn list_store_coupons(
        &self,
        store: StoreUuid,
    ) -> Result<StoreCoupons, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let store = match self.stores.get_store(&mut tx, store).await {
            Ok(store) => store,
            Err(sqlx::Error::RowNotFound) => return Err(CouponsServiceError::StoreNotFound),
            Err(error) => return Err(error.into()),
        };

        let coupons = self.repository.list_store_coupons(&mut tx, store.uuid).await?;

        tx.commit().await?;

        Ok(StoreCoupons { store, coupons })
    }

    async fn list_category_coupons(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryCoupons, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let category = match self.categories.get_category(&mut tx, category).await {
            Ok(category) => category,
            Err(sqlx::Error::RowNotFound) => return Err(CouponsServiceError::CategoryNotFound),
            Err(error) => return Err(error.into()),
        };

        let coupons = self
            .repository
            .list_category_coupons(&mut tx, category.uuid)
            .await?;

        tx.commit().await?;

        Ok(CategoryCoupons { category, coupons })
    }

    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, coupon),
        fields(
            coupon_uuid = %coupon.uuid,
            store_uuid = %coupon.store,
            coupon_count = tracing::field::Empty
        ),
        err
    )]
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if !self.stores.lock_store(&mut tx, coupon.store).await? {
            return Err(CouponsServiceError::StoreNotFound);
        }

        self.repository.create_coupon(&mut tx, &coupon).await?;

        self.repository
            .replace_categories(&mut tx, coupon.uuid, &coupon.categories)
            .await?;

        let coupon_count = self.stores.refresh_coupon_count(&mut tx, coupon.store).await?;

        tracing::Span::current().record("coupon_count", coupon_count);

        let created = self.repository.get_coupon(&mut tx, coupon.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "coupons.service.update_coupon",
        skip(self, update),
        fields(coupon_uuid = %coupon),
        err
    )]
    async fn update_coupon(
        &self,
        coupon: CouponUuid,
        update: CouponUpdate,
    ) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if let Some(store) = update.store
            && !self.stores.lock_store(&mut tx, store).await?
        {
            // A missing coupon takes precedence over a missing store.
            self.repository.get_coupon(&mut tx, coupon).await?;

            return Err(CouponsServiceError::StoreNotFound);
        }

        if self.repository.update_coupon(&mut tx, coupon, &update).await? == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        if let Some(categories) = &update.categories {
            self.repository
                .replace_categories(&mut tx, coupon, categories)
                .await?;
        }

        let updated = self.repository.get_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_coupon(&mut tx, coupon).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn track_use(&self, coupon: CouponUuid) -> Result<CouponUsage, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let usage = self
            .repository
            .track_use(&mut tx, coupon, POPULARITY_THRESHOLD)
            .await?;

        tx.commit().await?;

        Ok(usage)
    }

    #[tracing::instrument(name = "coupons.service.refresh_expiring_soon", skip(self), err)]
    async fn refresh_expiring_soon(&self, now: Timestamp) -> Result<u64, CouponsServiceError> {
        let window_end = now
            .checked_add(EXPIRING_SOON_WINDOW)
            .map_err(|_overflow| CouponsServiceError::InvalidData)?;

        let mut tx = self.db.begin_transaction().await?;

        let changed = self
            .repository
            .refresh_expiring_soon(&mut tx, now, window_end)
            .await?;

        tx.commit().await?;

        info!(changed, "refreshed expiring-soon flags");

        Ok(changed)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Lists coupons matching every criterion in `filter`, newest first.
    async fn list_coupons(&self, filter: CouponFilter) -> Result<CouponList, CouponsServiceError>;

    /// Popular coupons, most used first.
    async fn list_popular_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// New coupons, newest first.
    async fn list_new_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// Coupons flagged as expiring soon, soonest first.
    async fn list_expiring_soon_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// Substring search over title and description.
    async fn search_coupons(&self, query: String) -> Result<CouponList, CouponsServiceError>;

    /// Retrieve a single coupon.
    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError>;

    /// A store and its coupons, newest first.
    async fn list_store_coupons(&self, store: StoreUuid)
    -> Result<StoreCoupons, CouponsServiceError>;

    /// A category and its coupons, newest first.
    async fn list_category_coupons(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryCoupons, CouponsServiceError>;

    /// Creates a coupon and recounts its store's coupons.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Applies a partial update to a coupon.
    async fn update_coupon(
        &self,
        coupon: CouponUuid,
        update: CouponUpdate,
    ) -> Result<CouponRecord, CouponsServiceError>;

    /// Deletes a coupon.
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError>;

    /// Records one redemption of a coupon.
    async fn track_use(&self, coupon: CouponUuid) -> Result<CouponUsage, CouponsServiceError>;

    /// Recomputes the expiring-soon flag relative to `now`, returning how many
    /// coupons changed.
    async fn refresh_expiring_soon(&self, now: Timestamp) -> Result<u64, CouponsServiceError>;
}
