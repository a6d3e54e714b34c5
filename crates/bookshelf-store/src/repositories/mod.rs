//! Typed repositories over the host-owned tables.

pub mod activity;
pub mod books;
pub mod ratings;
pub mod settings;

pub use activity::ActivityRepository;
pub use books::{BookFilter, BookPatch, BookRepository, NewBook};
pub use ratings::RatingRepository;
pub use settings::SettingsRepository;
