use std::sync::Arc;

use axum::Router;
use bookshelf_core::AppResult;
use bookshelf_plugin::ui::UiHooks;
use bookshelf_plugin::{BookshelfPlugin, HostCapabilities, PluginManifest};

use crate::hooks::{SpiceBadgeHook, SpiceDetailHook, SpiceWidgetHook};
use crate::routes;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS spice_ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_id INTEGER NOT NULL,
    reader_name TEXT NOT NULL,
    chillies INTEGER NOT NULL CHECK(chillies BETWEEN 1 AND 5),
    rated_at DATETIME DEFAULT (datetime('now')),
    UNIQUE(book_id, reader_name)
)";

#[derive(Debug, Default)]
pub struct SpiceOMeterPlugin;

impl SpiceOMeterPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl BookshelfPlugin for SpiceOMeterPlugin {
    fn id(&self) -> &'static str {
        "spice-o-meter"
    }

    fn init(
        &self,
        host: Arc<dyn HostCapabilities>,
        _manifest: &PluginManifest,
    ) -> AppResult<Router> {
        host.run(SCHEMA, &[])?;
        host.persist()?;
        Ok(routes::router(host))
    }

    fn ui_hooks(&self, host: Arc<dyn HostCapabilities>) -> UiHooks {
        UiHooks {
            book_card: Some(Arc::new(SpiceBadgeHook::new(Arc::clone(&host)))),
            book_detail: Some(Arc::new(SpiceDetailHook::new(Arc::clone(&host)))),
            stats_widget: Some(Arc::new(SpiceWidgetHook::new(host))),
            ..UiHooks::default()
        }
    }
}
