//! # bookshelf-core
//!
//! Core crate for Family Bookshelf. Contains configuration schemas,
//! the unified error system, and the HTTP error mapping used by the
//! host API and by plugin route handlers.
//!
//! This crate has **no** internal dependencies on other Bookshelf crates.

pub mod config;
pub mod error;
pub mod http;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
