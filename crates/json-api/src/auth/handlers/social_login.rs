//! Social Login Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    auth::{
        errors::into_status_error,
        models::{SessionResponse, SocialLoginRequest},
    },
    extensions::*,
    state::State,
};

/// Social Login Handler
///
/// Signs in with a provider token, creating the account on first use.
#[endpoint(
    tags("auth"),
    summary = "Social Login",
    responses(
        (status_code = StatusCode::OK, description = "Login successful"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Provider token rejected"),
    ),
)]
#[tracing::instrument(
    name = "auth.social_login",
    skip(json, depot),
    fields(provider = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<SocialLoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("provider", request.provider.as_str());

    let issued = state
        .app
        .auth
        .social_login(request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(issued.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use coupons_app::{
        auth::{AuthServiceError, SocialLoginError},
        domain::users::records::UserUuid,
    };

    use crate::test_helpers::{Mocks, anonymous_service};

    use super::{super::tests::make_issued_session, *};

    fn make_service(mocks: Mocks) -> Service {
        anonymous_service(mocks, Router::with_path("auth/social-login").post(handler))
    }

    #[tokio::test]
    async fn test_social_login_issues_session() -> TestResult {
        let user = UserUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_social_login()
            .once()
            .withf(|login| login.provider == "google" && login.token == "provider-token")
            .return_once(move |_| Ok(make_issued_session(user, "cs_v1_social")));

        let response: SessionResponse = TestClient::post("http://example.com/auth/social-login")
            .json(&json!({ "provider": "google", "token": "provider-token" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.token, "cs_v1_social");

        Ok(())
    }

    #[tokio::test]
    async fn test_social_login_rejected_token_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_social_login()
            .once()
            .return_once(|_| Err(AuthServiceError::SocialLogin(SocialLoginError::Rejected)));

        let res = TestClient::post("http://example.com/auth/social-login")
            .json(&json!({ "provider": "google", "token": "" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
