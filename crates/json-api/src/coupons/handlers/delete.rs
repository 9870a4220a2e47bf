//! Delete Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{coupons::errors::into_status_error, extensions::*, state::State};

/// Delete Coupon Handler
///
/// The store's coupon count is left as is.
#[endpoint(
    tags("coupons"),
    summary = "Delete Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::CONFLICT, description = "Coupon has cashback transactions"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let coupon = coupon.into_inner();

    state
        .app
        .coupons
        .delete_coupon(coupon.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(coupon_uuid = %coupon, user_uuid = %user, "deleted coupon");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use coupons_app::domain::coupons::{CouponsServiceError, records::CouponUuid};

    use crate::test_helpers::{Mocks, authenticated_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        authenticated_service(mocks, Router::with_path("coupons/{coupon}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_200() -> TestResult {
        let uuid = CouponUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_delete_coupon()
            .once()
            .withf(move |coupon| *coupon == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/coupons/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_coupon_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_delete_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/coupons/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_referenced_coupon_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_delete_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::InvalidReference));

        let res = TestClient::delete(format!("http://example.com/coupons/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
