//! Did-not-finish tracking plugin.
//!
//! Lets each reader log where and why they abandoned a book, with an
//! upsert per (book, reader). Contributes a card badge, a detail
//! panel, and a "DNF Log" navigation tab to the host UI.

pub mod hooks;
pub mod plugin;
mod routes;

pub use plugin::DnfTrackerPlugin;
