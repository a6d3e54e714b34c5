//! Plugin runtime for the Family Bookshelf host.
//!
//! Plugins are compiled into the server binary and implement the
//! [`BookshelfPlugin`] trait. Whether a plugin is actually mounted is
//! decided at startup by scanning the plugins directory: each
//! subdirectory carrying a valid `manifest.json` whose `id` matches a
//! registered implementation gets its routes nested under
//! `/api/plugins/{id}`, its `public/` assets served under
//! `/plugins/{id}`, and its UI hooks registered with the host.
//! Anything that fails validation or initialization is skipped with a
//! warning, never taking the host down.

pub mod capabilities;
pub mod descriptor;
pub mod loader;
pub mod registry;
pub mod traits;
pub mod ui;

pub use capabilities::{HostCapabilities, StoreCapabilities};
pub use descriptor::{PluginManifest, SkipReason};
pub use loader::{LoadOutcome, PluginLoader};
pub use registry::{LoadedPlugin, PluginRegistry};
pub use traits::BookshelfPlugin;
pub use ui::{UiHookRegistry, UiHooks};
