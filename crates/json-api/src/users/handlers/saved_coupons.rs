//! Saved Coupons Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    coupons::models::CouponsResponse,
    extensions::*,
    state::State,
    users::errors::into_status_error,
};

/// Saved Coupons Handler
///
/// Returns the caller's saved coupons, most recently saved first.
#[endpoint(
    tags("users"),
    summary = "List Saved Coupons",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let coupons = state
        .app
        .users
        .list_saved_coupons(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use coupons_app::domain::coupons::records::CouponUuid;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service, make_coupon};

    use super::*;

    #[tokio::test]
    async fn test_saved_coupons_lists_callers_bookmarks() -> TestResult {
        let coupon = CouponUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_list_saved_coupons()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![make_coupon(coupon)]));

        let response: CouponsResponse =
            TestClient::get("http://example.com/user/saved-coupons")
                .send(&authenticated_service(
                    mocks,
                    Router::with_path("user/saved-coupons").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(
            response.coupons.first().map(|c| c.id),
            Some(coupon.into_uuid())
        );

        Ok(())
    }
}
