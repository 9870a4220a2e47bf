//! User Handlers

pub(crate) mod profile;
pub(crate) mod remove_saved_coupon;
pub(crate) mod save_coupon;
pub(crate) mod saved_coupons;
pub(crate) mod update_profile;
