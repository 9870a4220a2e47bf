//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{errors::into_status_error, models::MessageResponse},
    extensions::*,
    state::State,
};

/// Logout Handler
///
/// Revokes the session behind the bearer token.
#[endpoint(
    tags("auth"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Logout successful"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    state
        .app
        .auth
        .logout(session.session_uuid)
        .await
        .map_err(into_status_error)?;

    tracing::info!(session_uuid = %session.session_uuid, user_uuid = %session.user_uuid, "user logged out");

    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use coupons_app::auth::AuthServiceError;

    use crate::test_helpers::{Mocks, TEST_SESSION, authenticated_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        authenticated_service(mocks, Router::with_path("auth/logout").post(handler))
    }

    #[tokio::test]
    async fn test_logout_revokes_current_session() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_logout()
            .once()
            .withf(|session| *session == TEST_SESSION.session_uuid)
            .return_once(|_| Ok(()));

        let response: MessageResponse = TestClient::post("http://example.com/auth/logout")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.message, "Logout successful");

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_of_revoked_session_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_logout()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthorized));

        let res = TestClient::post("http://example.com/auth/logout")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
