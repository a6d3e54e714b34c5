//! # bookshelf-store
//!
//! Storage engine for Family Bookshelf. The database is an in-memory
//! SQLite instance restored from a file at startup and serialized back
//! explicitly via [`Store::persist`] — durability is **not** automatic
//! per write. Host-owned tables and additive migrations live in
//! [`schema`]; typed repositories over the host entities live in
//! [`repositories`].

pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub use store::{Row, Store};
