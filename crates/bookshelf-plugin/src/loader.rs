//! Startup plugin discovery and mounting.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::capabilities::HostCapabilities;
use crate::descriptor::{self, SkipReason};
use crate::registry::{LoadedPlugin, PluginRegistry};
use crate::traits::BookshelfPlugin;
use crate::ui::UiHookRegistry;

/// Everything the loader produced for the host to mount.
#[derive(Debug)]
pub struct LoadOutcome {
    api_router: Router,
    asset_router: Router,
    api_mounts: usize,
    asset_mounts: usize,
    pub registry: PluginRegistry,
    pub ui_hooks: UiHookRegistry,
}

impl Default for LoadOutcome {
    fn default() -> Self {
        Self {
            api_router: Router::new(),
            asset_router: Router::new(),
            api_mounts: 0,
            asset_mounts: 0,
            registry: PluginRegistry::default(),
            ui_hooks: UiHookRegistry::default(),
        }
    }
}

impl LoadOutcome {
    /// Router with every plugin's API nested at `/{id}`, if any loaded.
    pub fn take_api_router(&mut self) -> Option<Router> {
        (self.api_mounts > 0).then(|| std::mem::take(&mut self.api_router))
    }

    /// Router serving each plugin's `public/` directory at `/{id}`.
    pub fn take_asset_router(&mut self) -> Option<Router> {
        (self.asset_mounts > 0).then(|| std::mem::take(&mut self.asset_router))
    }
}

/// Scans a plugins directory and mounts every directory that passes
/// validation against the compiled-in implementations.
#[derive(Debug, Default)]
pub struct PluginLoader {
    builtins: Vec<Arc<dyn BookshelfPlugin>>,
}

impl PluginLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compiled-in implementation, keyed by its id.
    pub fn register(mut self, plugin: Arc<dyn BookshelfPlugin>) -> Self {
        self.builtins.push(plugin);
        self
    }

    /// Walks `plugins_root` and loads every eligible plugin directory.
    ///
    /// A directory is skipped, with a warning, when its descriptor is
    /// missing or invalid, when no implementation is registered for its
    /// id, when its id collides with an already loaded plugin, or when
    /// its initializer returns an error or panics. Skipping never aborts
    /// the scan.
    pub fn load_all(&self, plugins_root: &Path, host: Arc<dyn HostCapabilities>) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        if !plugins_root.is_dir() {
            info!(path = %plugins_root.display(), "No plugins directory; skipping plugin load");
            return outcome;
        }
        let entries = match fs::read_dir(plugins_root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %plugins_root.display(), error = %err, "Cannot read plugins directory");
                return outcome;
            }
        };

        let mut dirs: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            self.load_one(&dir, Arc::clone(&host), &mut outcome);
        }

        info!(count = outcome.registry.count(), "Plugin load complete");
        outcome
    }

    fn load_one(&self, dir: &Path, host: Arc<dyn HostCapabilities>, outcome: &mut LoadOutcome) {
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let manifest = match descriptor::read_manifest(dir) {
            Ok(manifest) => manifest,
            Err(reason) => {
                warn!(plugin_dir = %dir_name, reason = %reason, "Skipping plugin directory");
                return;
            }
        };

        if outcome.registry.contains(&manifest.id) {
            warn!(
                plugin_dir = %dir_name,
                id = %manifest.id,
                "Duplicate plugin id; keeping the first-loaded plugin"
            );
            return;
        }

        let Some(plugin) = self.builtins.iter().find(|p| p.id() == manifest.id) else {
            let reason = SkipReason::UnregisteredId(manifest.id.clone());
            warn!(plugin_dir = %dir_name, reason = %reason, "Skipping plugin directory");
            return;
        };

        // A misbehaving initializer must not take the host down.
        let init = panic::catch_unwind(AssertUnwindSafe(|| {
            plugin.init(Arc::clone(&host), &manifest)
        }));
        let router = match init {
            Ok(Ok(router)) => router,
            Ok(Err(err)) => {
                error!(plugin_dir = %dir_name, id = %manifest.id, error = %err, "Plugin failed to initialize");
                return;
            }
            Err(payload) => {
                error!(
                    plugin_dir = %dir_name,
                    id = %manifest.id,
                    panic = %panic_message(&payload),
                    "Plugin initializer panicked"
                );
                return;
            }
        };

        outcome.api_router = std::mem::take(&mut outcome.api_router)
            .nest(&format!("/{}", manifest.id), router);
        outcome.api_mounts += 1;

        let public_dir = dir.join("public");
        if public_dir.is_dir() {
            outcome.asset_router = std::mem::take(&mut outcome.asset_router)
                .nest_service(&format!("/{}", manifest.id), ServeDir::new(public_dir));
            outcome.asset_mounts += 1;
        }

        let hooks = plugin.ui_hooks(Arc::clone(&host));
        let slots = hooks.slot_names();
        outcome.ui_hooks.register(&manifest.id, hooks);

        info!(
            id = %manifest.id,
            name = %manifest.name,
            version = %manifest.version_label(),
            hooks = ?slots,
            "Plugin loaded"
        );
        let version = manifest.version_label().to_owned();
        outcome.registry.record(LoadedPlugin {
            id: manifest.id,
            name: manifest.name,
            version,
            description: manifest.description,
            hooks: slots.into_iter().map(str::to_owned).collect(),
            path: dir.to_path_buf(),
            enabled: true,
        });
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
