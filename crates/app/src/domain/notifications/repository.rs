//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_parsed,
    domain::{
        coupons::records::CouponUuid,
        notifications::{
            data::NewNotification,
            records::{NotificationRecord, NotificationUuid},
        },
        stores::records::StoreUuid,
        users::records::UserUuid,
    },
};

const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const MARK_NOTIFICATION_READ_SQL: &str = include_str!("sql/mark_notification_read.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(LIST_NOTIFICATIONS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: &NewNotification,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(CREATE_NOTIFICATION_SQL)
            .bind(notification.uuid.into_uuid())
            .bind(notification.user.into_uuid())
            .bind(notification.kind.as_str())
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(notification.coupon.map(CouponUuid::into_uuid))
            .bind(notification.store.map(StoreUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    /// Only the owning user can mark a notification; anything else is
    /// `RowNotFound`.
    pub(crate) async fn mark_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(MARK_NOTIFICATION_READ_SQL)
            .bind(notification.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            kind: try_get_parsed(row, "kind")?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            coupon: row
                .try_get::<Option<Uuid>, _>("coupon_uuid")?
                .map(CouponUuid::from_uuid),
            store: row
                .try_get::<Option<Uuid>, _>("store_uuid")?
                .map(StoreUuid::from_uuid),
            is_read: row.try_get("is_read")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
