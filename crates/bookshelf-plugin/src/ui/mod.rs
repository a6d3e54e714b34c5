//! Server-side UI extension points.
//!
//! Plugins contribute small HTML fragments to fixed slots in the host
//! UI. The host composes them through the `/api/ui/*` endpoints so the
//! frontend never needs to know which plugins are installed.

mod hooks;
mod registry;

pub use hooks::{BookCardHook, BookDetailHook, NavTabHook, StatsWidgetHook, UiHooks};
pub use registry::{DetailPanel, NavTabEntry, UiHookRegistry};
