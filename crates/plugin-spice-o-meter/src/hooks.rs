//! UI fragments contributed to the host.

use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::AppResult;
use bookshelf_plugin::ui::{BookCardHook, BookDetailHook, StatsWidgetHook};
use bookshelf_plugin::HostCapabilities;
use serde_json::{json, Value};
use tracing::warn;

type Host = Arc<dyn HostCapabilities>;

fn chillies_html(avg: f64) -> String {
    let filled = avg.round() as i64;
    (1..=5)
        .map(|i| if i <= filled { "🌶️" } else { "·" })
        .collect()
}

/// Card badge showing the average spice level.
pub struct SpiceBadgeHook {
    host: Host,
}

impl SpiceBadgeHook {
    pub fn new(host: Host) -> Self {
        Self { host }
    }
}

impl BookCardHook for SpiceBadgeHook {
    fn render(&self, book: &Value) -> String {
        let Some(book_id) = book["id"].as_i64() else {
            return String::new();
        };
        let avg = match self.host.query(
            "SELECT ROUND(AVG(chillies), 1) as avg FROM spice_ratings WHERE book_id = ?1",
            &[json!(book_id)],
        ) {
            Ok(rows) => rows.first().and_then(|row| row["avg"].as_f64()),
            Err(err) => {
                warn!(error = %err, "Spice badge query failed");
                None
            }
        };
        match avg {
            Some(avg) => format!(
                r#"<span class="spice-badge">{} {avg} spice</span>"#,
                chillies_html(avg)
            ),
            None => String::new(),
        }
    }
}

/// Detail panel with the average and every reader's chillies.
pub struct SpiceDetailHook {
    host: Host,
}

impl SpiceDetailHook {
    pub fn new(host: Host) -> Self {
        Self { host }
    }
}

#[async_trait]
impl BookDetailHook for SpiceDetailHook {
    async fn render(&self, book: &Value) -> AppResult<String> {
        let Some(book_id) = book["id"].as_i64() else {
            return Ok(String::new());
        };
        let ratings = self.host.query(
            "SELECT reader_name, chillies FROM spice_ratings \
             WHERE book_id = ?1 ORDER BY rated_at DESC",
            &[json!(book_id)],
        )?;
        if ratings.is_empty() {
            return Ok(
                r#"<section class="spice-level"><h3>Spice Level</h3><p>No spice ratings yet</p></section>"#
                    .to_owned(),
            );
        }

        let total: i64 = ratings
            .iter()
            .filter_map(|row| row["chillies"].as_i64())
            .sum();
        let avg = total as f64 / ratings.len() as f64;
        let mut html = format!(
            r#"<section class="spice-level"><h3>Spice Level</h3><p>{} {:.1} / 5 ({} rating{})</p><ul>"#,
            chillies_html(avg),
            avg,
            ratings.len(),
            if ratings.len() == 1 { "" } else { "s" },
        );
        for row in &ratings {
            let reader = row["reader_name"].as_str().unwrap_or("");
            let chillies = row["chillies"].as_i64().unwrap_or(0);
            html.push_str(&format!(
                r#"<li>{reader}: {}</li>"#,
                chillies_html(chillies as f64)
            ));
        }
        html.push_str("</ul></section>");
        Ok(html)
    }
}

/// Stats-page widget: the household's spiciest reads.
pub struct SpiceWidgetHook {
    host: Host,
}

impl SpiceWidgetHook {
    pub fn new(host: Host) -> Self {
        Self { host }
    }
}

#[async_trait]
impl StatsWidgetHook for SpiceWidgetHook {
    async fn render(&self) -> AppResult<String> {
        let spiciest = self.host.query(
            "SELECT b.title, ROUND(AVG(s.chillies), 1) as avg_spice \
             FROM books b JOIN spice_ratings s ON s.book_id = b.id \
             GROUP BY b.id ORDER BY avg_spice DESC LIMIT 5",
            &[],
        )?;
        if spiciest.is_empty() {
            return Ok(String::new());
        }
        let mut html =
            String::from(r#"<section class="spice-widget"><h3>Spiciest Reads</h3><ol>"#);
        for row in &spiciest {
            let title = row["title"].as_str().unwrap_or("");
            let avg = row["avg_spice"].as_f64().unwrap_or(0.0);
            html.push_str(&format!(
                r#"<li>{title} {} {avg}</li>"#,
                chillies_html(avg)
            ));
        }
        html.push_str("</ol></section>");
        Ok(html)
    }
}
