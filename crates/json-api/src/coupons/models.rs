//! Coupon Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use coupons_app::domain::{
    categories::records::CategoryUuid,
    coupons::{
        data::{CashbackKind, CashbackOffer, CouponUpdate, Discount, DiscountKind, NewCoupon},
        records::{CouponList, CouponRecord, CouponStore, CouponUsage, CouponUuid},
    },
};

use crate::{categories::models::CategoryResponse, extensions::*};

const MAX_PERCENTAGE: f64 = 100.0;

fn percentage_within_bounds(kind: &str, value: f64) -> Result<(), ValidationError> {
    if kind == "percentage" && value > MAX_PERCENTAGE {
        return Err(ValidationError::new("percentage").with_message("must not exceed 100".into()));
    }

    Ok(())
}

fn validate_discount(discount: &DiscountPayload) -> Result<(), ValidationError> {
    percentage_within_bounds(&discount.kind, discount.value)
}

fn validate_cashback(cashback: &CashbackPayload) -> Result<(), ValidationError> {
    percentage_within_bounds(&cashback.kind, cashback.value)
}

/// Discount descriptor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_discount"))]
pub(crate) struct DiscountPayload {
    /// One of `percentage`, `fixed` or `bogo`
    #[serde(rename = "type")]
    pub kind: String,

    /// Non-negative; at most 100 for `percentage`
    #[validate(range(min = 0.0))]
    pub value: f64,
}

impl TryFrom<DiscountPayload> for Discount {
    type Error = StatusError;

    fn try_from(payload: DiscountPayload) -> Result<Self, Self::Error> {
        Ok(Discount {
            kind: payload
                .kind
                .parse::<DiscountKind>()
                .or_400("unknown discount type")?,
            value: payload.value,
        })
    }
}

impl From<Discount> for DiscountPayload {
    fn from(discount: Discount) -> Self {
        DiscountPayload {
            kind: discount.kind.as_str().to_string(),
            value: discount.value,
        }
    }
}

/// Cashback descriptor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_cashback"))]
pub(crate) struct CashbackPayload {
    pub available: bool,

    #[validate(range(min = 0.0))]
    pub value: f64,

    /// One of `percentage` or `fixed`
    #[serde(rename = "type")]
    pub kind: String,
}

impl TryFrom<CashbackPayload> for CashbackOffer {
    type Error = StatusError;

    fn try_from(payload: CashbackPayload) -> Result<Self, Self::Error> {
        Ok(CashbackOffer {
            available: payload.available,
            value: payload.value,
            kind: payload
                .kind
                .parse::<CashbackKind>()
                .or_400("unknown cashback type")?,
        })
    }
}

impl From<CashbackOffer> for CashbackPayload {
    fn from(offer: CashbackOffer) -> Self {
        CashbackPayload {
            available: offer.available,
            value: offer.value,
            kind: offer.kind.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CouponStoreResponse {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
    pub website: String,
}

impl From<CouponStore> for CouponStoreResponse {
    fn from(store: CouponStore) -> Self {
        CouponStoreResponse {
            id: store.uuid.into(),
            name: store.name,
            logo: store.logo,
            website: store.website,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CouponResponse {
    /// The unique identifier of the coupon
    pub id: Uuid,

    pub title: String,
    pub description: String,

    /// Redemption code
    pub code: String,

    pub discount: DiscountPayload,
    pub store: CouponStoreResponse,
    pub categories: Vec<CategoryResponse>,
    pub expiry_date: String,
    pub terms: Option<String>,
    pub is_verified: bool,
    pub success_rate: f64,
    pub url: Option<String>,
    pub used_count: u64,
    pub is_popular: bool,
    pub is_new: bool,

    /// As of the last expiring-soon refresh
    pub is_expiring_soon: bool,

    pub cashback_info: Option<CashbackPayload>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        CouponResponse {
            id: coupon.uuid.into(),
            title: coupon.title,
            description: coupon.description,
            code: coupon.code,
            discount: coupon.discount.into(),
            store: coupon.store.into(),
            categories: coupon.categories.into_iter().map(Into::into).collect(),
            expiry_date: coupon.expiry_date.to_string(),
            terms: coupon.terms,
            is_verified: coupon.is_verified,
            success_rate: coupon.success_rate,
            url: coupon.url,
            used_count: coupon.used_count,
            is_popular: coupon.is_popular,
            is_new: coupon.is_new,
            is_expiring_soon: coupon.is_expiring_soon,
            cashback_info: coupon.cashback.map(Into::into),
            created_at: coupon.created_at.to_string(),
            updated_at: coupon.updated_at.to_string(),
        }
    }
}

pub(crate) fn into_responses(coupons: Vec<CouponRecord>) -> Vec<CouponResponse> {
    coupons.into_iter().map(Into::into).collect()
}

/// Coupons wrapped for the client's `{ coupons }` shape
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    pub coupons: Vec<CouponResponse>,
}

impl From<Vec<CouponRecord>> for CouponsResponse {
    fn from(coupons: Vec<CouponRecord>) -> Self {
        CouponsResponse {
            coupons: into_responses(coupons),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponListResponse {
    pub coupons: Vec<CouponResponse>,

    /// Number of coupons returned
    pub total: u64,
}

impl From<CouponList> for CouponListResponse {
    fn from(list: CouponList) -> Self {
        CouponListResponse {
            coupons: into_responses(list.coupons),
            total: list.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CouponUsageResponse {
    pub id: Uuid,
    pub used_count: u64,
    pub is_popular: bool,
}

impl From<CouponUsage> for CouponUsageResponse {
    fn from(usage: CouponUsage) -> Self {
        CouponUsageResponse {
            id: usage.uuid.into(),
            used_count: usage.used_count,
            is_popular: usage.is_popular,
        }
    }
}

fn into_category_uuids(ids: Vec<Uuid>) -> SmallVec<[CategoryUuid; 3]> {
    ids.into_iter().map(CategoryUuid::from_uuid).collect()
}

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCouponRequest {
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub description: String,

    #[validate(custom(function = "not_blank"))]
    pub code: String,

    #[validate(nested)]
    pub discount: DiscountPayload,

    pub store_id: Uuid,

    /// Ids with no matching category are ignored
    #[serde(default)]
    pub category_ids: Vec<Uuid>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub expiry_date: String,

    pub terms: Option<String>,

    #[validate(url)]
    pub url: Option<String>,

    #[validate(nested)]
    pub cashback_info: Option<CashbackPayload>,
}

impl TryFrom<CreateCouponRequest> for NewCoupon {
    type Error = StatusError;

    fn try_from(request: CreateCouponRequest) -> Result<Self, Self::Error> {
        request.validate_or_400()?;

        Ok(NewCoupon {
            uuid: CouponUuid::new(),
            title: request.title,
            description: request.description,
            code: request.code,
            discount: request.discount.try_into()?,
            store: request.store_id.into(),
            categories: into_category_uuids(request.category_ids),
            expiry_date: parse_timestamp(&request.expiry_date, "expiryDate")?,
            terms: request.terms,
            url: request.url,
            cashback: request.cashback_info.map(TryInto::try_into).transpose()?,
        })
    }
}

/// Update Coupon Request
///
/// Absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCouponRequest {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub code: Option<String>,

    #[validate(nested)]
    pub discount: Option<DiscountPayload>,

    pub store_id: Option<Uuid>,

    /// Replaces the whole category set when present
    pub category_ids: Option<Vec<Uuid>>,

    pub expiry_date: Option<String>,
    pub terms: Option<String>,

    #[validate(url)]
    pub url: Option<String>,

    #[validate(nested)]
    pub cashback_info: Option<CashbackPayload>,
}

impl TryFrom<UpdateCouponRequest> for CouponUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateCouponRequest) -> Result<Self, Self::Error> {
        request.validate_or_400()?;

        Ok(CouponUpdate {
            title: request.title,
            description: request.description,
            code: request.code,
            discount: request.discount.map(TryInto::try_into).transpose()?,
            store: request.store_id.map(Into::into),
            categories: request.category_ids.map(into_category_uuids),
            expiry_date: request
                .expiry_date
                .as_deref()
                .map(|value| parse_timestamp(value, "expiryDate"))
                .transpose()?,
            terms: request.terms,
            url: request.url,
            cashback: request.cashback_info.map(TryInto::try_into).transpose()?,
        })
    }
}
