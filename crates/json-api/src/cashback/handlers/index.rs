//! Cashback Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cashback::{errors::into_status_error, models::CashbackTransactionsResponse},
    extensions::*,
    state::State,
};

/// Cashback Index Handler
///
/// Returns the caller's cashback transactions, newest first.
#[endpoint(
    tags("cashback"),
    summary = "List Cashback Transactions",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CashbackTransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let transactions = state
        .app
        .cashback
        .list_transactions(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(transactions.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use coupons_app::domain::{
        cashback::{
            CashbackServiceError,
            data::CashbackStatus,
            records::{CashbackTransactionRecord, CashbackTransactionUuid},
        },
        coupons::records::CouponUuid,
        stores::records::StoreUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, authenticated_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        authenticated_service(mocks, Router::with_path("user/cashback").get(handler))
    }

    #[tokio::test]
    async fn test_cashback_lists_paid_transaction_with_payout_date() -> TestResult {
        let transaction = CashbackTransactionRecord {
            uuid: CashbackTransactionUuid::new(),
            user: TEST_USER_UUID,
            coupon: CouponUuid::new(),
            store: StoreUuid::new(),
            amount: 1_250,
            status: CashbackStatus::Paid,
            transaction_date: Timestamp::UNIX_EPOCH,
            payout_date: Some(Timestamp::UNIX_EPOCH),
        };

        let mut mocks = Mocks::default();

        mocks
            .cashback
            .expect_list_transactions()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![transaction]));

        let response: CashbackTransactionsResponse =
            TestClient::get("http://example.com/user/cashback")
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.transactions.len(), 1, "expected one transaction");

        let paid = response.transactions.first().ok_or("missing transaction")?;

        assert_eq!(paid.status, "paid");
        assert_eq!(paid.amount, 1_250);
        assert!(paid.payout_date.is_some(), "paid transactions carry a payout date");

        Ok(())
    }

    #[tokio::test]
    async fn test_cashback_storage_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .cashback
            .expect_list_transactions()
            .once()
            .return_once(|_| Err(CashbackServiceError::Sql(sqlx::Error::PoolClosed)));

        let res = TestClient::get("http://example.com/user/cashback")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
