//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use coupons_app::auth::AuthServiceError;

use crate::{extensions::*, observability::record_auth_rejection, state::State};

/// Resolve the bearer token to a session and make it available to handlers.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        record_auth_rejection("missing");
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let session = match state.app.auth.authenticate_bearer(token).await {
        Ok(session) => session,
        Err(AuthServiceError::Unauthorized) => {
            record_auth_rejection("invalid");
            res.render(StatusError::unauthorized().brief("Invalid or expired session token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate session token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_session(session);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use coupons_app::auth::AuthenticatedSession;

    use crate::test_helpers::{Mocks, TEST_USER_UUID};

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .user_uuid_or_401()
            .map_or_else(|_| "missing".to_string(), |uuid| uuid.to_string());

        res.render(user);
    }

    fn make_service(mocks: Mocks) -> Service {
        let router = Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(handler)
            .push(Router::new().get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_token_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "cs_v1_expired")
            .return_once(|_| Err(AuthServiceError::Unauthorized));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer cs_v1_expired", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer cs_v1_token", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_session() -> TestResult {
        let session = AuthenticatedSession {
            session_uuid: Uuid::now_v7(),
            user_uuid: TEST_USER_UUID,
        };

        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "cs_v1_valid")
            .return_once(move |_| Ok(session));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer cs_v1_valid", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, TEST_USER_UUID.to_string());

        Ok(())
    }
}
