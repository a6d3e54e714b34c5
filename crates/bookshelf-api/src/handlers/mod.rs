//! Request handlers, organized by domain.

pub mod activity;
pub mod books;
pub mod health;
pub mod lookup;
pub mod plugins;
pub mod ratings;
pub mod settings;
pub mod ui;
