use std::sync::Arc;

use axum::Router;
use bookshelf_core::AppResult;
use bookshelf_plugin::ui::UiHooks;
use bookshelf_plugin::{BookshelfPlugin, HostCapabilities, PluginManifest};

use crate::hooks::{DnfBadgeHook, DnfDetailHook, DnfTabHook};
use crate::routes;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS dnf_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_id INTEGER NOT NULL,
    reader_name TEXT NOT NULL,
    reason TEXT,
    stopped_at TEXT,
    notes TEXT,
    dnf_at DATETIME DEFAULT (datetime('now')),
    UNIQUE(book_id, reader_name)
)";

/// Canned abandonment reasons offered by the log form.
pub const DNF_REASONS: &[&str] = &[
    "Too slow",
    "Not my vibe",
    "Too dark",
    "Not dark enough",
    "Bad writing",
    "Annoying characters",
    "Boring plot",
    "Triggers hit too hard",
    "Too much insta-love",
    "Just not feeling it",
];

#[derive(Debug, Default)]
pub struct DnfTrackerPlugin;

impl DnfTrackerPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl BookshelfPlugin for DnfTrackerPlugin {
    fn id(&self) -> &'static str {
        "dnf-tracker"
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
            book_card: Some(Arc::new(DnfBadgeHook::new(Arc::clone(&host)))),
            book_detail: Some(Arc::new(DnfDetailHook::new(Arc::clone(&host)))),
            nav_tab: Some(Arc::new(DnfTabHook::new(host))),
            ..UiHooks::default()
        }
    }
}
