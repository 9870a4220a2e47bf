//! Notifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        notifications::{
            data::NewNotification,
            errors::NotificationsServiceError,
            records::{NotificationRecord, NotificationUuid},
            repository::PgNotificationsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let notifications = self.repository.list_notifications(&mut tx, user).await?;

        tx.commit().await?;

        Ok(notifications)
    }

    #[tracing::instrument(
        name = "notifications.service.create_notification",
        skip(self, notification),
        fields(
            notification_uuid = %notification.uuid,
            user_uuid = %notification.user,
            kind = %notification.kind
        ),
        err
    )]
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_notification(&mut tx, &notification)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn mark_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let notification = self.repository.mark_read(&mut tx, user, notification).await?;

        tx.commit().await?;

        Ok(notification)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// A user's notifications, newest first.
    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    /// Marks one of the user's notifications as read. Notifications owned by
    /// someone else are reported as not found.
    async fn mark_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError>;
}
