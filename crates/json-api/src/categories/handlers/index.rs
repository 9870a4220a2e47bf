//! Category Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::{errors::into_status_error, models::CategoriesResponse},
    extensions::*,
    state::State,
};

/// Category Index Handler
///
/// Returns every category ordered by name.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use coupons_app::domain::categories::{CategoriesServiceError, records::CategoryUuid};

    use crate::test_helpers::{Mocks, anonymous_service, make_category};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        anonymous_service(mocks, Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_categories_in_service_order() -> TestResult {
        let electronics = CategoryUuid::new();
        let travel = CategoryUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_list_categories()
            .once()
            .return_once(move || {
                Ok(vec![
                    make_category(electronics, "Electronics"),
                    make_category(travel, "Travel"),
                ])
            });

        let response: CategoriesResponse = TestClient::get("http://example.com/categories")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let ids: Vec<Uuid> = response
            .categories
            .iter()
            .map(|category| category.id)
            .collect();

        assert_eq!(ids, vec![electronics.into_uuid(), travel.into_uuid()]);
        assert_eq!(
            response.categories.first().map(|c| c.slug.as_str()),
            Some("electronics")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_list_categories()
            .once()
            .return_once(|| Err(CategoriesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
