//! Coupons Data

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::domain::{
    UnknownValueError, categories::records::CategoryUuid, coupons::records::CouponUuid,
    stores::records::StoreUuid,
};

/// How a coupon's discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// `value` percent off.
    Percentage,

    /// `value` off in the store's currency.
    Fixed,

    /// Buy one, get one.
    Bogo,
}

impl DiscountKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
            Self::Bogo => "bogo",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountKind {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            "bogo" => Ok(Self::Bogo),
            _ => Err(UnknownValueError::new("discount type", value)),
        }
    }
}

/// Discount descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: f64,
}

/// How cashback on a coupon is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashbackKind {
    Percentage,
    Fixed,
}

impl CashbackKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl FromStr for CashbackKind {
    type Err = UnknownValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            _ => Err(UnknownValueError::new("cashback type", value)),
        }
    }
}

/// Cashback descriptor attached to a coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashbackOffer {
    pub available: bool,
    pub value: f64,
    pub kind: CashbackKind,
}

/// New Coupon Data
///
/// Coupons are always created with `is_new` set.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub discount: Discount,
    pub store: StoreUuid,

    /// Category ids to attach; ids with no matching category are skipped.
    pub categories: SmallVec<[CategoryUuid; 3]>,

    pub expiry_date: Timestamp,
    pub terms: Option<String>,
    pub url: Option<String>,
    pub cashback: Option<CashbackOffer>,
}

/// Coupon Update Data
///
/// Fields left as `None` keep their stored value. When `categories` is set
/// it replaces the whole category set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub discount: Option<Discount>,
    pub store: Option<StoreUuid>,
    pub categories: Option<SmallVec<[CategoryUuid; 3]>>,
    pub expiry_date: Option<Timestamp>,
    pub terms: Option<String>,
    pub url: Option<String>,
    pub cashback: Option<CashbackOffer>,
}

/// Coupon listing filter. All present criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponFilter {
    pub category: Option<CategoryUuid>,
    pub store: Option<StoreUuid>,

    /// Substring matched against title, description and store name.
    pub search: Option<String>,

    /// Only popular coupons when `true`; `false` applies no restriction.
    pub popular: bool,

    /// Only new coupons when `true`; `false` applies no restriction.
    pub new: bool,

    /// Only expiring-soon coupons when `true`; `false` applies no restriction.
    pub expiring_soon: bool,
}

impl CouponFilter {
    /// `LIKE` pattern for the search term, or `None` when there is nothing to
    /// search for.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(like_contains_pattern)
    }
}

/// Build a `LIKE ... ESCAPE '\'` pattern matching `term` anywhere.
pub(crate) fn like_contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);

    pattern.push('%');

    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('%');

    pattern
}
