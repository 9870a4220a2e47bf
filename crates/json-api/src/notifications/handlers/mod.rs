//! Notification Handlers

pub(crate) mod index;
pub(crate) mod mark_read;

#[cfg(test)]
pub(crate) fn make_notification(
    uuid: coupons_app::domain::notifications::records::NotificationUuid,
) -> coupons_app::domain::notifications::records::NotificationRecord {
    use coupons_app::domain::notifications::{
        data::NotificationKind, records::NotificationRecord,
    };

    NotificationRecord {
        uuid,
        user: crate::test_helpers::TEST_USER_UUID,
        kind: NotificationKind::PriceAlert,
        title: "Price drop".to_string(),
        message: "A saved deal got cheaper".to_string(),
        coupon: None,
        store: None,
        is_read: false,
        created_at: jiff::Timestamp::UNIX_EPOCH,
    }
}
