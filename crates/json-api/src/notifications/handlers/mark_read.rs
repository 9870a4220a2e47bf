//! Mark Notification Read Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    notifications::{errors::into_status_error, models::NotificationResponse},
    state::State,
};

/// Mark Notification Read Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark Notification Read",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Notification marked as read"),
        (status_code = StatusCode::NOT_FOUND, description = "Notification not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    notification: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<NotificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let notification = state
        .app
        .notifications
        .mark_read(user, notification.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(notification.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use coupons_app::domain::notifications::{
        NotificationsServiceError, records::NotificationUuid,
    };

    use crate::{
        notifications::handlers::make_notification,
        test_helpers::{Mocks, TEST_USER_UUID, authenticated_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        authenticated_service(
            mocks,
            Router::with_path("user/notifications/{notification}/read").put(handler),
        )
    }

    #[tokio::test]
    async fn test_mark_read_returns_updated_notification() -> TestResult {
        let notification = NotificationUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .notifications
            .expect_mark_read()
            .once()
            .withf(move |user, uuid| *user == TEST_USER_UUID && *uuid == notification)
            .return_once(|_, uuid| {
                let mut record = make_notification(uuid);

                record.is_read = true;

                Ok(record)
            });

        let response: NotificationResponse = TestClient::put(format!(
            "http://example.com/user/notifications/{notification}/read"
        ))
        .send(&make_service(mocks))
        .await
        .take_json()
        .await?;

        assert_eq!(response.id, notification.into_uuid());
        assert!(response.is_read, "notification should be read");

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_read_of_foreign_notification_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .notifications
            .expect_mark_read()
            .once()
            .return_once(|_, _| Err(NotificationsServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/user/notifications/{}/read",
            Uuid::now_v7()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
