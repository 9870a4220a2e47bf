//! Coupon Records

use jiff::Timestamp;

use crate::{
    domain::{
        categories::records::CategoryRecord,
        coupons::data::{CashbackOffer, Discount},
        stores::records::{StoreRecord, StoreUuid},
    },
    uuids::TypedUuid,
};

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// The store a coupon belongs to, as joined onto coupon rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub logo: String,
    pub website: String,
}

/// Coupon Record
#[derive(Debug, Clone, PartialEq)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub discount: Discount,
    pub store: CouponStore,
    pub categories: Vec<CategoryRecord>,
    pub expiry_date: Timestamp,
    pub terms: Option<String>,
    pub url: Option<String>,
    pub is_verified: bool,
    pub success_rate: f64,
    pub used_count: u64,
    pub is_popular: bool,
    pub is_new: bool,

    /// Cached; only as fresh as the last expiring-soon refresh.
    pub is_expiring_soon: bool,

    pub cashback: Option<CashbackOffer>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Filtered coupon listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponList {
    pub coupons: Vec<CouponRecord>,
    pub total: u64,
}

impl From<Vec<CouponRecord>> for CouponList {
    fn from(coupons: Vec<CouponRecord>) -> Self {
        let total = coupons.len() as u64;

        Self { coupons, total }
    }
}

/// A store together with its coupons.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCoupons {
    pub store: StoreRecord,
    pub coupons: Vec<CouponRecord>,
}

/// A category together with its coupons.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCoupons {
    pub category: CategoryRecord,
    pub coupons: Vec<CouponRecord>,
}

/// Usage counters after a coupon redemption was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponUsage {
    pub uuid: CouponUuid,
    pub used_count: u64,
    pub is_popular: bool,
}
