//! HTTP surface of the Family Bookshelf host.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::{AppService, build_router};
pub use state::AppState;
