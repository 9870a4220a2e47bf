//! Notification Records

use jiff::Timestamp;

use crate::{
    domain::{
        coupons::records::CouponUuid, notifications::data::NotificationKind,
        stores::records::StoreUuid, users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notification Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub user: UserUuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,

    /// Cleared when the coupon is deleted.
    pub coupon: Option<CouponUuid>,

    /// Cleared when the store is deleted.
    pub store: Option<StoreUuid>,

    pub is_read: bool,
    pub created_at: Timestamp,
}
