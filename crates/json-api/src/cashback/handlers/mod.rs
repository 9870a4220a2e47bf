//! Cashback Handlers

pub(crate) mod index;
