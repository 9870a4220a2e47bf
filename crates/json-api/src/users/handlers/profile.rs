//! Get Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Get Profile Handler
#[endpoint(
    tags("users"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The caller's profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .users
        .get_profile(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use coupons_app::domain::users::UsersServiceError;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service, make_user};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        authenticated_service(mocks, Router::with_path("user/profile").get(handler))
    }

    #[tokio::test]
    async fn test_profile_never_exposes_password_hash() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_get_profile()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| Ok(make_user(user)));

        let body: Value = TestClient::get("http://example.com/user/profile")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body["email"], "shopper@example.com");
        assert_eq!(body["preferences"]["notifications"]["newDeals"], true);
        assert!(body.get("password").is_none(), "password must not be serialised");
        assert!(body.get("passwordHash").is_none(), "hash must not be serialised");

        Ok(())
    }

    #[tokio::test]
    async fn test_profile_of_deleted_user_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_get_profile()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get("http://example.com/user/profile")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
