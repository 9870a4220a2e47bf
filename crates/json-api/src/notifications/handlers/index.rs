//! Notifications Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    notifications::{errors::into_status_error, models::NotificationsResponse},
    state::State,
};

/// Notifications Index Handler
///
/// Returns the caller's notifications, newest first.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<NotificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let notifications = state
        .app
        .notifications
        .list_notifications(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(notifications.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use coupons_app::domain::notifications::records::NotificationUuid;

    use crate::{
        notifications::handlers::make_notification,
        test_helpers::{Mocks, TEST_USER_UUID, authenticated_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_notifications_use_wire_type_labels() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .notifications
            .expect_list_notifications()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(vec![make_notification(NotificationUuid::new())]));

        let body: Value = TestClient::get("http://example.com/user/notifications")
            .send(&authenticated_service(
                mocks,
                Router::with_path("user/notifications").get(handler),
            ))
            .await
            .take_json()
            .await?;

        let notification = &body["notifications"][0];

        assert_eq!(notification["type"], "price_alert");
        assert_eq!(notification["isRead"], false);
        assert!(notification["couponId"].is_null(), "no coupon reference");

        Ok(())
    }
}
