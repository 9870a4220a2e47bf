//! Login Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    auth::{
        errors::into_status_error,
        models::{LoginRequest, SessionResponse},
    },
    extensions::*,
    state::State,
};

/// Login Handler
///
/// Exchanges an email and password for a bearer session token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Login successful"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %issued.user.uuid, session_uuid = %issued.session.uuid, "user logged in");

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use coupons_app::{auth::AuthServiceError, domain::users::records::UserUuid};

    use crate::test_helpers::{Mocks, anonymous_service};

    use super::{super::tests::make_issued_session, *};

    fn make_service(mocks: Mocks) -> Service {
        anonymous_service(mocks, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token_and_user() -> TestResult {
        let user = UserUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "shopper@example.com" && credentials.password == "password123"
            })
            .return_once(move |_| Ok(make_issued_session(user, "cs_v1_token")));

        let response: SessionResponse = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "shopper@example.com", "password": "password123" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.token, "cs_v1_token");
        assert_eq!(response.user.id, user.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_login_wrong_password_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthorized));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "shopper@example.com", "password": "nope" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_malformed_body_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "shopper@example.com" }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
