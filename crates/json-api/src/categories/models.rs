//! Category Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::categories::records::CategoryRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub id: Uuid,

    pub name: String,

    /// URL-safe unique name
    pub slug: String,

    /// Icon name rendered by the client
    pub icon: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            id: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            icon: category.icon,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

impl From<Vec<CategoryRecord>> for CategoriesResponse {
    fn from(categories: Vec<CategoryRecord>) -> Self {
        CategoriesResponse {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}
