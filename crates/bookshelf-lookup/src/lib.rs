//! Book metadata lookup against Open Library, plus the household's
//! genre and content-warning taxonomy.

mod client;
pub mod genres;

pub use client::{BookLookup, LookupClient};
