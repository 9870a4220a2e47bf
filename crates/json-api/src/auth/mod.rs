//! Authentication

mod errors;
mod handlers;
pub(crate) mod middleware;
mod models;

pub(crate) use handlers::*;
