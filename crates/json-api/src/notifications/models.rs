//! Notification Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::notifications::records::NotificationRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotificationResponse {
    pub id: Uuid,

    /// One of `expiry`, `new`, `price_alert` or `system`
    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,
    pub message: String,
    pub coupon_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(notification: NotificationRecord) -> Self {
        NotificationResponse {
            id: notification.uuid.into(),
            kind: notification.kind.as_str().to_string(),
            title: notification.title,
            message: notification.message,
            coupon_id: notification.coupon.map(Into::into),
            store_id: notification.store.map(Into::into),
            is_read: notification.is_read,
            created_at: notification.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    pub notifications: Vec<NotificationResponse>,
}

impl From<Vec<NotificationRecord>> for NotificationsResponse {
    fn from(notifications: Vec<NotificationRecord>) -> Self {
        NotificationsResponse {
            notifications: notifications.into_iter().map(Into::into).collect(),
        }
    }
}
