//! Update Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use coupons_app::domain::coupons::data::CouponUpdate;

use crate::{
    coupons::{
        errors::into_status_error,
        models::{CouponResponse, UpdateCouponRequest},
    },
    extensions::*,
    state::State,
};

/// Update Coupon Handler
///
/// Merges the supplied fields into the coupon.
#[endpoint(
    tags("coupons"),
    summary = "Update Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon or store not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "coupons.update",
    skip(coupon, json, depot),
    fields(coupon_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    json: JsonBody<UpdateCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let coupon = coupon.into_inner();
    let update = CouponUpdate::try_from(json.into_inner())?;

    depot.session_or_401()?;

    tracing::Span::current().record("coupon_uuid", tracing::field::display(coupon));

    let updated = state
        .app
        .coupons
        .update_coupon(coupon.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use coupons_app::domain::coupons::{CouponsServiceError, records::CouponUuid};

    use crate::test_helpers::{Mocks, authenticated_service, make_coupon};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        authenticated_service(mocks, Router::with_path("coupons/{coupon}").patch(handler))
    }

    #[tokio::test]
    async fn test_update_forwards_only_present_fields() -> TestResult {
        let uuid = CouponUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_update_coupon()
            .once()
            .withf(move |coupon, update| {
                *coupon == uuid
                    && *update
                        == CouponUpdate {
                            title: Some("Half price".to_string()),
                            ..CouponUpdate::default()
                        }
            })
            .return_once(move |_, _| {
                let mut coupon = make_coupon(uuid);

                coupon.title = "Half price".to_string();

                Ok(coupon)
            });

        let response: CouponResponse =
            TestClient::patch(format!("http://example.com/coupons/{uuid}"))
                .json(&json!({ "title": "Half price" }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.title, "Half price");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_coupon_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .coupons
            .expect_update_coupon()
            .once()
            .return_once(|_, _| Err(CouponsServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/coupons/{}", Uuid::now_v7()))
            .json(&json!({ "code": "NEWCODE" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_discount_type_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.coupons.expect_update_coupon().never();

        let res = TestClient::patch(format!("http://example.com/coupons/{}", Uuid::now_v7()))
            .json(&json!({ "discount": { "type": "half", "value": 50 } }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
