//! Update Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use coupons_app::domain::users::data::UserUpdate;

use crate::{
    extensions::*,
    state::State,
    users::{
        errors::into_status_error,
        models::{UpdateProfileRequest, UserResponse},
    },
};

/// Update Profile Handler
///
/// Merges the supplied fields into the caller's profile.
#[endpoint(
    tags("users"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(
    name = "users.update_profile",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let update = UserUpdate::try_from(json.into_inner())?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let profile = state
        .app
        .users
        .update_profile(user, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use coupons_app::domain::users::UsersServiceError;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service, make_user};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        authenticated_service(mocks, Router::with_path("user/profile").patch(handler))
    }

    #[tokio::test]
    async fn test_update_profile_merges_fields() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID
                    && update.name.as_deref() == Some("Renamed")
                    && update.email.is_none()
                    && update.preferences.notifications.push == Some(false)
            })
            .return_once(|user, _| {
                let mut profile = make_user(user);

                profile.name = "Renamed".to_string();
                profile.preferences.notifications.push = false;

                Ok(profile)
            });

        let response: UserResponse = TestClient::patch("http://example.com/user/profile")
            .json(&json!({
                "name": "Renamed",
                "preferences": { "notifications": { "push": false } },
            }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.name, "Renamed");
        assert!(!response.preferences.notifications.push, "push disabled");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_taken_email_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(UsersServiceError::EmailTaken));

        let res = TestClient::patch("http://example.com/user/profile")
            .json(&json!({ "email": "taken@example.com" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_invalid_email_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.users.expect_update_profile().never();

        let res = TestClient::patch("http://example.com/user/profile")
            .json(&json!({ "email": "not-an-email" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
