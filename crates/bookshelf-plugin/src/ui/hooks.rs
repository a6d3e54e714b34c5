use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::AppResult;
use serde_json::Value;

/// Decorates one catalog card. Cards render in bulk, so this hook is
/// synchronous and should stay cheap; return an empty string to add
/// nothing for this book.
pub trait BookCardHook: Send + Sync {
    fn render(&self, book: &Value) -> String;
}

/// Contributes a panel to the book detail view.
#[async_trait]
pub trait BookDetailHook: Send + Sync {
    async fn render(&self, book: &Value) -> AppResult<String>;
}

/// Adds a top-level navigation tab with its own page content.
#[async_trait]
pub trait NavTabHook: Send + Sync {
    fn label(&self) -> String;
    async fn render(&self) -> AppResult<String>;
}

/// Contributes a widget to the household stats page.
#[async_trait]
pub trait StatsWidgetHook: Send + Sync {
    async fn render(&self) -> AppResult<String>;
}

/// The extension points one plugin fills in. Every slot is optional.
#[derive(Default, Clone)]
pub struct UiHooks {
    pub book_card: Option<Arc<dyn BookCardHook>>,
    pub book_detail: Option<Arc<dyn BookDetailHook>>,
    pub nav_tab: Option<Arc<dyn NavTabHook>>,
    pub stats_widget: Option<Arc<dyn StatsWidgetHook>>,
}

impl UiHooks {
    /// Names of the slots this plugin actually fills.
    pub fn slot_names(&self) -> Vec<&'static str> {
        let mut slots = Vec::new();
        if self.book_card.is_some() {
            slots.push("bookCard");
        }
        if self.book_detail.is_some() {
            slots.push("bookDetail");
        }
        if self.nav_tab.is_some() {
            slots.push("navTab");
        }
        if self.stats_widget.is_some() {
            slots.push("statsWidget");
        }
        slots
    }
}

impl fmt::Debug for UiHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiHooks")
            .field("slots", &self.slot_names())
            .finish()
    }
}
