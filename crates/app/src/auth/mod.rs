//! Authentication

mod errors;
mod hex;
mod models;
mod passwords;
mod repository;
mod service;
mod social;
mod token;

pub use errors::*;
pub use models::*;
pub use passwords::{PasswordHashError, hash_password, random_password, verify_password};
pub use service::*;
pub use social::*;
pub use token::*;
