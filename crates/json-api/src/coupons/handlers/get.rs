//! Get Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    coupons::{errors::into_status_error, models::CouponResponse},
    extensions::*,
    state::State,
};

/// Get Coupon Handler
///
/// Returns a coupon with its store and categories.
#[endpoint(
    tags("coupons"),
    summary = "Get Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon found"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed coupon id"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .get_coupon(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use coupons_app::domain::coupons::{CouponsServiceError, records::CouponUuid};

    use crate::test_helpers::{Mocks, anonymous_service, make_coupon};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        anonymous_service(mocks, Router::with_path("coupons/{coupon}").get(handler))
    }

    #[tokio::test]
    async fn test_get_renders_camel_case_fields() -> TestResult {
        let uuid = CouponUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_get_coupon()
            .once()
            .withf(move |coupon| *coupon == uuid)
            .return_once(move |_| Ok(make_coupon(uuid)));

        let body: Value = TestClient::get(format!("http://example.com/coupons/{uuid}"))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body["id"], uuid.to_string());
        assert_eq!(body["discount"]["type"], "percentage");
        assert_eq!(body["isNew"], true);
        assert_eq!(body["usedCount"], 0);
        assert!(body["cashbackInfo"].is_null(), "no cashback offer");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_coupon_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_get_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/coupons/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
