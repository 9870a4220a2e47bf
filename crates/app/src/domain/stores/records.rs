//! Store Records

use jiff::Timestamp;

use crate::{domain::categories::records::CategoryRecord, uuids::TypedUuid};

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub uuid: StoreUuid,
    pub name: String,
    pub logo: String,
    pub website: String,

    /// Number of coupons pointing at this store, as of the last coupon
    /// creation against it.
    pub coupon_count: u64,

    pub is_popular: bool,
    pub categories: Vec<CategoryRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
