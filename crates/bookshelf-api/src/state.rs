use std::sync::Arc;

use bookshelf_core::config::AppConfig;
use bookshelf_lookup::LookupClient;
use bookshelf_plugin::{HostCapabilities, PluginRegistry, UiHookRegistry};
use bookshelf_store::repositories::{
    ActivityRepository, BookRepository, RatingRepository, SettingsRepository,
};
use bookshelf_store::Store;

/// Shared application state threaded through every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<Store>,
    pub capabilities: Arc<dyn HostCapabilities>,
    pub books: BookRepository,
    pub ratings: RatingRepository,
    pub settings: SettingsRepository,
    pub activity: ActivityRepository,
    pub lookup: Arc<LookupClient>,
    pub plugins: Arc<PluginRegistry>,
    pub ui_hooks: Arc<UiHookRegistry>,
}
