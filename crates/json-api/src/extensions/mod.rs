//! Extension traits

mod depot;
mod result;
mod timestamps;
mod validation;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use timestamps::parse_timestamp;
pub(crate) use validation::{ValidateExt as _, not_blank};
