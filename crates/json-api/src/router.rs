//! App Router

use salvo::Router;

use crate::{auth, cashback, categories, coupons, notifications, stores, users};

/// Routes mounted under `/api`.
///
/// Public and authenticated routes live in sibling trees so that only the
/// second one runs the bearer middleware. Static coupon segments are pushed
/// ahead of `{coupon}`.
pub fn app_router() -> Router {
    Router::new().push(public_router()).push(authenticated_router())
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("social-login").post(auth::social_login::handler)),
        )
        .push(
            Router::with_path("coupons")
                .get(coupons::index::handler)
                .push(Router::with_path("popular").get(coupons::popular::handler))
                .push(Router::with_path("recommended").get(coupons::recommended::handler))
                .push(Router::with_path("expiring-soon").get(coupons::expiring_soon::handler))
                .push(Router::with_path("search").get(coupons::search::handler))
                .push(Router::with_path("store/{store}").get(coupons::store::handler))
                .push(Router::with_path("category/{category}").get(coupons::category::handler))
                .push(
                    Router::with_path("{coupon}")
                        .get(coupons::get::handler)
                        .push(Router::with_path("use").post(coupons::track_use::handler)),
                ),
        )
        .push(
            Router::with_path("stores")
                .get(stores::index::handler)
                .push(Router::with_path("popular").get(stores::popular::handler))
                .push(Router::with_path("{store}").get(stores::get::handler)),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{category}").get(categories::get::handler)),
        )
}

fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("auth")
                .push(Router::with_path("me").get(auth::me::handler))
                .push(Router::with_path("logout").post(auth::logout::handler)),
        )
        .push(
            Router::with_path("coupons")
                .post(coupons::create::handler)
                .push(
                    Router::with_path("{coupon}")
                        .patch(coupons::update::handler)
                        .delete(coupons::delete::handler)
                        .push(Router::with_path("verify").post(coupons::verify::handler)),
                ),
        )
        .push(
            Router::with_path("user")
                .push(
                    Router::with_path("profile")
                        .get(users::profile::handler)
                        .patch(users::update_profile::handler),
                )
                .push(
                    Router::with_path("saved-coupons")
                        .get(users::saved_coupons::handler)
                        .push(
                            Router::with_path("{coupon}")
                                .post(users::save_coupon::handler)
                                .delete(users::remove_saved_coupon::handler),
                        ),
                )
                .push(
                    Router::with_path("notifications")
                        .get(notifications::index::handler)
                        .push(
                            Router::with_path("{notification}/read")
                                .put(notifications::mark_read::handler),
                        ),
                )
                .push(Router::with_path("cashback").get(cashback::index::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use coupons_app::{
        auth::AuthServiceError,
        domain::{categories::records::CategoryUuid, coupons::records::CouponUuid},
    };

    use crate::test_helpers::{Mocks, TEST_SESSION, make_category, make_coupon};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_public_routes_skip_authentication() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_authenticate_bearer().never();
        mocks
            .categories
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec![make_category(CategoryUuid::new(), "Food")]));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_static_coupon_segments_win_over_coupon_id() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.coupons.expect_get_coupon().never();
        mocks
            .coupons
            .expect_list_popular_coupons()
            .once()
            .return_once(|| Ok(vec![make_coupon(CouponUuid::new())]));

        let res = TestClient::get("http://example.com/coupons/popular")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_user_routes_require_a_bearer_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.users.expect_get_profile().never();

        let res = TestClient::get("http://example.com/user/profile")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_coupon_writes_require_a_valid_session() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthorized));
        mocks.coupons.expect_delete_coupon().never();

        let res = TestClient::delete(format!(
            "http://example.com/coupons/{}",
            CouponUuid::new()
        ))
        .add_header(AUTHORIZATION, "Bearer cs_v1_stale", true)
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticated_caller_reaches_user_routes() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(TEST_SESSION));
        mocks
            .cashback
            .expect_list_transactions()
            .once()
            .withf(|user| *user == TEST_SESSION.user_uuid)
            .return_once(|_| Ok(Vec::new()));

        let body: serde_json::Value = TestClient::get("http://example.com/user/cashback")
            .add_header(AUTHORIZATION, "Bearer cs_v1_valid", true)
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(
            body,
            serde_json::json!({ "transactions": [] }),
            "no transactions expected"
        );

        Ok(())
    }
}
