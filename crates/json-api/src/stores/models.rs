//! Store Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::stores::records::StoreRecord;

use crate::categories::models::CategoryResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreResponse {
    /// The unique identifier of the store
    pub id: Uuid,

    pub name: String,
    pub logo: String,
    pub website: String,
    pub categories: Vec<CategoryResponse>,

    /// Coupons pointing at the store as of its last coupon creation
    pub coupon_count: u64,

    pub is_popular: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StoreRecord> for StoreResponse {
    fn from(store: StoreRecord) -> Self {
        StoreResponse {
            id: store.uuid.into(),
            name: store.name,
            logo: store.logo,
            website: store.website,
            categories: store.categories.into_iter().map(Into::into).collect(),
            coupon_count: store.coupon_count,
            is_popular: store.is_popular,
            created_at: store.created_at.to_string(),
            updated_at: store.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoresResponse {
    pub stores: Vec<StoreResponse>,
}

impl From<Vec<StoreRecord>> for StoresResponse {
    fn from(stores: Vec<StoreRecord>) -> Self {
        StoresResponse {
            stores: stores.into_iter().map(Into::into).collect(),
        }
    }
}
