//! UI fragments contributed to the host.

use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::AppResult;
use bookshelf_plugin::ui::{BookCardHook, BookDetailHook, NavTabHook};
use bookshelf_plugin::HostCapabilities;
use serde_json::{json, Value};
use tracing::warn;

type Host = Arc<dyn HostCapabilities>;

/// Card badge: "🚫 N DNF" when anyone abandoned the book.
pub struct DnfBadgeHook {
    host: Host,
}

impl DnfBadgeHook {
    pub fn new(host: Host) -> Self {
        Self { host }
    }
}

impl BookCardHook for DnfBadgeHook {
    fn render(&self, book: &Value) -> String {
        let Some(book_id) = book["id"].as_i64() else {
            return String::new();
        };
        let count = match self.host.query(
            "SELECT COUNT(*) as count FROM dnf_entries WHERE book_id = ?1",
            &[json!(book_id)],
        ) {
            Ok(rows) => rows
                .first()
                .and_then(|row| row["count"].as_i64())
                .unwrap_or(0),
            Err(err) => {
                warn!(error = %err, "DNF badge query failed");
                0
            }
        };
        if count == 0 {
            return String::new();
        }
        format!(r#"<span class="dnf-badge">🚫 {count} DNF</span>"#)
    }
}

/// Detail panel listing who abandoned the book and why.
pub struct DnfDetailHook {
    host: Host,
}

impl DnfDetailHook {
    pub fn new(host: Host) -> Self {
        Self { host }
    }
}

#[async_trait]
impl BookDetailHook for DnfDetailHook {
    async fn render(&self, book: &Value) -> AppResult<String> {
        let Some(book_id) = book["id"].as_i64() else {
            return Ok(String::new());
        };
        let entries = self.host.query(
            "SELECT reader_name, reason, stopped_at, notes FROM dnf_entries \
             WHERE book_id = ?1 ORDER BY dnf_at DESC",
            &[json!(book_id)],
        )?;
        if entries.is_empty() {
            return Ok(
                r#"<section class="dnf-log"><h3>DNF Log</h3><p>Nobody has DNF'd this book yet!</p></section>"#
                    .to_owned(),
            );
        }

        let mut html = String::from(r#"<section class="dnf-log"><h3>DNF Log</h3><ul>"#);
        for entry in &entries {
            let reader = entry["reader_name"].as_str().unwrap_or("");
            html.push_str(&format!(r#"<li><strong>{reader}</strong>"#));
            if let Some(reason) = entry["reason"].as_str() {
                html.push_str(&format!(" — {reason}"));
            }
            if let Some(stopped_at) = entry["stopped_at"].as_str() {
                html.push_str(&format!(r#" <em>(stopped at {stopped_at})</em>"#));
            }
            if let Some(notes) = entry["notes"].as_str() {
                html.push_str(&format!(r#"<blockquote>{notes}</blockquote>"#));
            }
            html.push_str("</li>");
        }
        html.push_str("</ul></section>");
        Ok(html)
    }
}

/// Household-wide "DNF Log" navigation tab.
pub struct DnfTabHook {
    host: Host,
}

impl DnfTabHook {
    pub fn new(host: Host) -> Self {
        Self { host }
    }
}

#[async_trait]
impl NavTabHook for DnfTabHook {
    fn label(&self) -> String {
        "DNF Log".to_owned()
    }

    async fn render(&self) -> AppResult<String> {
        let entries = self.host.query(
            "SELECT d.reader_name, d.reason, d.stopped_at, b.title, b.author \
             FROM dnf_entries d JOIN books b ON b.id = d.book_id \
             ORDER BY d.dnf_at DESC",
            &[],
        )?;
        let mut html = String::from(r#"<section class="dnf-page"><h2>DNF Log</h2>"#);
        if entries.is_empty() {
            html.push_str("<p>Nothing abandoned yet. Optimistic household!</p>");
        } else {
            html.push_str("<ul>");
            for entry in &entries {
                let title = entry["title"].as_str().unwrap_or("");
                let author = entry["author"].as_str().unwrap_or("");
                let reader = entry["reader_name"].as_str().unwrap_or("");
                let reason = entry["reason"].as_str().unwrap_or("no reason given");
                html.push_str(&format!(
                    r#"<li><strong>{title}</strong> by {author} — {reader}: {reason}</li>"#
                ));
            }
            html.push_str("</ul>");
        }
        html.push_str("</section>");
        Ok(html)
    }
}
