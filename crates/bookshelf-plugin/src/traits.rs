use std::fmt;
use std::sync::Arc;

use axum::Router;
use bookshelf_core::AppResult;

use crate::capabilities::HostCapabilities;
use crate::descriptor::PluginManifest;
use crate::ui::UiHooks;

/// A compiled-in plugin implementation.
///
/// Implementations are registered with the [`PluginLoader`] at startup
/// and only become active when a plugin directory with a matching
/// manifest id is found on disk.
///
/// [`PluginLoader`]: crate::loader::PluginLoader
pub trait BookshelfPlugin: Send + Sync {
    /// Must equal the `id` declared in the plugin's `manifest.json`.
    fn id(&self) -> &'static str;

    /// Runs schema setup and returns the plugin's router. The router is
    /// mounted under `/api/plugins/{id}`, so routes are relative to that
    /// prefix. An error here skips this plugin without affecting others.
    fn init(&self, host: Arc<dyn HostCapabilities>, manifest: &PluginManifest)
        -> AppResult<Router>;

    /// UI extension points contributed by this plugin. Defaults to none.
    fn ui_hooks(&self, host: Arc<dyn HostCapabilities>) -> UiHooks {
        let _ = host;
        UiHooks::default()
    }
}

impl fmt::Debug for dyn BookshelfPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookshelfPlugin")
            .field("id", &self.id())
            .finish()
    }
}
