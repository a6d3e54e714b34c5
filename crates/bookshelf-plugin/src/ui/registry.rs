use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::hooks::UiHooks;

/// One plugin's contribution to the book detail view.
#[derive(Debug, Clone, Serialize)]
pub struct DetailPanel {
    pub plugin: String,
    pub html: String,
}

/// A navigation tab as listed for the frontend shell.
#[derive(Debug, Clone, Serialize)]
pub struct NavTabEntry {
    pub plugin: String,
    pub label: String,
}

/// UI hooks from every loaded plugin, in load order.
///
/// Composition is absence-tolerant: a plugin without a hook for a slot
/// simply contributes nothing, and a hook that fails is logged and
/// dropped from the composed output rather than failing the request.
#[derive(Default)]
pub struct UiHookRegistry {
    entries: Vec<(String, UiHooks)>,
}

impl UiHookRegistry {
    pub(crate) fn register(&mut self, plugin_id: &str, hooks: UiHooks) {
        self.entries.push((plugin_id.to_owned(), hooks));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenated card fragments for one book.
    pub fn render_book_cards(&self, book: &Value) -> String {
        let mut html = String::new();
        for (_, hooks) in &self.entries {
            if let Some(hook) = &hooks.book_card {
                html.push_str(&hook.render(book));
            }
        }
        html
    }

    /// Detail panels for one book, one entry per contributing plugin.
    pub async fn render_book_details(&self, book: &Value) -> Vec<DetailPanel> {
        let mut panels = Vec::new();
        for (plugin, hooks) in &self.entries {
            let Some(hook) = &hooks.book_detail else {
                continue;
            };
            match hook.render(book).await {
                Ok(html) => panels.push(DetailPanel {
                    plugin: plugin.clone(),
                    html,
                }),
                Err(err) => {
                    warn!(plugin = %plugin, error = %err, "Book detail hook failed; panel omitted");
                }
            }
        }
        panels
    }

    /// Every navigation tab contributed by a plugin.
    pub fn nav_tabs(&self) -> Vec<NavTabEntry> {
        self.entries
            .iter()
            .filter_map(|(plugin, hooks)| {
                hooks.nav_tab.as_ref().map(|tab| NavTabEntry {
                    plugin: plugin.clone(),
                    label: tab.label(),
                })
            })
            .collect()
    }

    /// Page content for one plugin's navigation tab. `Ok(None)` means the
    /// plugin is not loaded or has no tab.
    pub async fn render_nav_tab(&self, plugin_id: &str) -> bookshelf_core::AppResult<Option<String>> {
        for (plugin, hooks) in &self.entries {
            if plugin != plugin_id {
                continue;
            }
            if let Some(tab) = &hooks.nav_tab {
                return tab.render().await.map(Some);
            }
        }
        Ok(None)
    }

    /// Concatenated stats widgets from every plugin that has one.
    pub async fn render_stats_widgets(&self) -> String {
        let mut html = String::new();
        for (plugin, hooks) in &self.entries {
            let Some(hook) = &hooks.stats_widget else {
                continue;
            };
            match hook.render().await {
                Ok(fragment) => html.push_str(&fragment),
                Err(err) => {
                    warn!(plugin = %plugin, error = %err, "Stats widget hook failed; widget omitted");
                }
            }
        }
        html
    }
}

impl fmt::Debug for UiHookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (plugin, hooks) in &self.entries {
            map.entry(plugin, &hooks.slot_names());
        }
        map.finish()
    }
}
