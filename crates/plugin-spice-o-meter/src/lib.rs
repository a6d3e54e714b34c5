//! Spice rating plugin.
//!
//! Readers rate books on a one-to-five chilli scale, one rating per
//! (book, reader). Contributes a card badge, a detail panel, and a
//! stats-page widget to the host UI.

pub mod hooks;
pub mod plugin;
mod routes;

pub use plugin::SpiceOMeterPlugin;
