//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, users::models::UserResponse};

/// Current User Handler
///
/// Returns the account behind the bearer token.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let user = state
        .app
        .users
        .get_profile(user)
        .await
        .map_err(crate::users::errors::into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service, make_user};

    use super::*;

    #[tokio::test]
    async fn test_me_returns_session_user() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_get_profile()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| Ok(make_user(user)));

        let response: UserResponse = TestClient::get("http://example.com/auth/me")
            .send(&authenticated_service(
                mocks,
                Router::with_path("auth/me").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.id, TEST_USER_UUID.into_uuid());

        Ok(())
    }
}
