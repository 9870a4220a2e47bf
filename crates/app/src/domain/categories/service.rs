//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        data::NewCategory,
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    #[tracing::instrument(
        name = "categories.service.create_category",
        skip(self, category),
        fields(category_uuid = %category.uuid, slug = %category.slug),
        err
    )]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a category; slugs are unique.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_category_then_get_returns_it() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CategoryUuid::new();

        ctx.categories
            .create_category(NewCategory {
                uuid,
                name: "Fashion".to_string(),
                slug: "fashion".to_string(),
                icon: "shirt".to_string(),
            })
            .await?;

        let category = ctx.categories.get_category(uuid).await?;

        assert_eq!(category.uuid, uuid);
        assert_eq!(category.name, "Fashion");
        assert_eq!(category.slug, "fashion");

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_orders_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("Travel").await?;
        ctx.create_category("Electronics").await?;

        let names: Vec<String> = ctx
            .categories
            .list_categories()
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect();

        assert_eq!(names, vec!["Electronics".to_string(), "Travel".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("Food").await?;

        let result = ctx
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Food & Drink".to_string(),
                slug: "food".to_string(),
                icon: String::new(),
            })
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.get_category(CategoryUuid::new()).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
