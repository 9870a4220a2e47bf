//! Cashback Records

use jiff::Timestamp;

use crate::{
    domain::{
        cashback::data::CashbackStatus, coupons::records::CouponUuid, stores::records::StoreUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cashback Transaction UUID
pub type CashbackTransactionUuid = TypedUuid<CashbackTransactionRecord>;

/// Cashback Transaction Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashbackTransactionRecord {
    pub uuid: CashbackTransactionUuid,
    pub user: UserUuid,
    pub coupon: CouponUuid,
    pub store: StoreUuid,

    /// Minor currency units.
    pub amount: u64,

    pub status: CashbackStatus,
    pub transaction_date: Timestamp,

    /// Set exactly when the status is `paid`.
    pub payout_date: Option<Timestamp>,
}
