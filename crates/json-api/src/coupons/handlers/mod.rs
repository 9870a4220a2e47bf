//! Coupon Handlers

pub(crate) mod category;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod expiring_soon;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod popular;
pub(crate) mod recommended;
pub(crate) mod search;
pub(crate) mod store;
pub(crate) mod track_use;
pub(crate) mod update;
pub(crate) mod verify;
