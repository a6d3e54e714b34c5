use std::time::Duration;

use bookshelf_core::config::LookupConfig;
use bookshelf_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::genres::{extract_genres, extract_trigger_warnings};

/// Everything the add-book form can prefill from one lookup.
#[derive(Debug, Clone, Serialize)]
pub struct BookLookup {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub cover_url: Option<String>,
    pub synopsis: String,
    pub genres: Vec<String>,
    pub trigger_warnings: Vec<String>,
    pub kindle_url: String,
    pub open_library_key: Option<String>,
    pub published_year: Option<i64>,
    pub page_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    key: Option<String>,
    title: Option<String>,
    author_name: Option<Vec<String>>,
    isbn: Option<Vec<String>>,
    cover_i: Option<i64>,
    first_publish_year: Option<i64>,
    number_of_pages_median: Option<i64>,
    subject: Option<Vec<String>>,
}

/// Queries Open Library for book metadata.
///
/// Lookup never fails the request: when Open Library is unreachable or
/// has no match, the caller gets a skeleton result echoing the query so
/// the form can still be filled in by hand.
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    endpoint: String,
    covers_endpoint: String,
}

impl LookupClient {
    pub fn new(config: &LookupConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    bookshelf_core::error::ErrorKind::Configuration,
                    "Failed to build lookup HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            covers_endpoint: config.covers_endpoint.trim_end_matches('/').to_owned(),
        })
    }

    /// Looks up a book by ISBN when the query looks like one, otherwise
    /// by title and optional author.
    pub async fn lookup(&self, title_or_isbn: &str, author: &str) -> BookLookup {
        let compact: String = title_or_isbn.replace('-', "");
        if (10..=13).contains(&compact.len()) && compact.chars().all(|c| c.is_ascii_digit()) {
            match self.by_isbn(&compact).await {
                Ok(Some(found)) => return found,
                Ok(None) => debug!(isbn = %compact, "No Open Library record for ISBN"),
                Err(err) => warn!(isbn = %compact, error = %err, "ISBN lookup failed"),
            }
        }

        match self.by_search(title_or_isbn, author).await {
            Ok(Some(found)) => found,
            Ok(None) => self.fallback(title_or_isbn, author),
            Err(err) => {
                warn!(query = %title_or_isbn, error = %err, "Open Library lookup failed");
                self.fallback(title_or_isbn, author)
            }
        }
    }

    async fn by_isbn(&self, isbn: &str) -> AppResult<Option<BookLookup>> {
        let url = format!(
            "{}/api/books?bibkeys=ISBN:{isbn}&format=json&jscmd=data",
            self.endpoint
        );
        let data: Value = self.fetch_json(&url).await?;
        let Some(record) = data.get(format!("ISBN:{isbn}")) else {
            return Ok(None);
        };

        let title = string_at(record, "title").unwrap_or_default();
        let author = record
            .pointer("/authors/0/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let cover_url = string_at(record, "cover/large")
            .or_else(|| string_at(record, "cover/medium"));
        // `notes` is either a plain string or `{ "value": ... }`.
        let synopsis = record
            .get("notes")
            .map(|n| match n {
                Value::String(s) => s.clone(),
                other => string_at(other, "value").unwrap_or_default(),
            })
            .unwrap_or_default();
        let subjects = subject_names(record.get("subjects"));
        let published_year = string_at(record, "publish_date")
            .and_then(|d| leading_year(&d));

        Ok(Some(BookLookup {
            kindle_url: kindle_search_url(&title),
            author,
            isbn: Some(isbn.to_owned()),
            cover_url,
            synopsis,
            genres: extract_genres(&subjects),
            trigger_warnings: extract_trigger_warnings(&subjects),
            open_library_key: string_at(record, "key"),
            published_year,
            page_count: record.get("number_of_pages").and_then(Value::as_i64),
            title,
        }))
    }

    async fn by_search(&self, title: &str, author: &str) -> AppResult<Option<BookLookup>> {
        let query = format!("{title} {author}");
        let url = format!(
            "{}/search.json?q={}&limit=3&fields=key,title,author_name,isbn,cover_i,first_publish_year,number_of_pages_median,subject",
            self.endpoint,
            urlencoding::encode(query.trim())
        );
        let search: SearchResponse = self.fetch_json(&url).await?;
        let Some(doc) = search.docs.into_iter().next() else {
            return Ok(None);
        };

        // The work record carries the synopsis and richer subjects.
        let mut synopsis = String::new();
        let mut genres = Vec::new();
        let mut trigger_warnings = Vec::new();
        if let Some(key) = &doc.key {
            match self.fetch_json::<Value>(&format!("{}{key}.json", self.endpoint)).await {
                Ok(work) => {
                    synopsis = work
                        .get("description")
                        .map(|d| match d {
                            Value::String(s) => s.clone(),
                            other => string_at(other, "value").unwrap_or_default(),
                        })
                        .unwrap_or_default();
                    if let Some(subjects) = work.get("subjects") {
                        let subjects = subject_names(Some(subjects));
                        genres = extract_genres(&subjects);
                        trigger_warnings = extract_trigger_warnings(&subjects);
                    }
                }
                Err(err) => debug!(key = %key, error = %err, "Work record fetch failed"),
            }
        }
        if genres.is_empty() {
            if let Some(subjects) = &doc.subject {
                genres = extract_genres(subjects);
                trigger_warnings = extract_trigger_warnings(subjects);
            }
        }

        Ok(Some(BookLookup {
            title: doc.title.unwrap_or_else(|| title.to_owned()),
            author: doc
                .author_name
                .and_then(|names| names.into_iter().next())
                .unwrap_or_else(|| author.to_owned()),
            isbn: doc.isbn.and_then(|list| list.into_iter().next()),
            cover_url: doc
                .cover_i
                .map(|id| format!("{}/b/id/{id}-L.jpg", self.covers_endpoint)),
            synopsis,
            genres,
            trigger_warnings,
            kindle_url: kindle_search_url(query.trim()),
            open_library_key: doc.key,
            published_year: doc.first_publish_year,
            page_count: doc.number_of_pages_median,
        }))
    }

    fn fallback(&self, title: &str, author: &str) -> BookLookup {
        BookLookup {
            title: title.to_owned(),
            author: author.to_owned(),
            isbn: None,
            cover_url: None,
            synopsis: String::new(),
            genres: Vec::new(),
            trigger_warnings: Vec::new(),
            kindle_url: kindle_search_url(format!("{title} {author}").trim()),
            open_library_key: None,
            published_year: None,
            page_count: None,
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.http.get(url).send().await.map_err(|e| {
            AppError::external_service(format!("Open Library request failed: {e}"))
        })?;
        response.json::<T>().await.map_err(|e| {
            AppError::external_service(format!("Open Library returned invalid JSON: {e}"))
        })
    }
}

fn kindle_search_url(query: &str) -> String {
    format!(
        "https://www.amazon.com/s?k={}&i=digital-text",
        urlencoding::encode(query)
    )
}

/// Subject entries are either strings or `{ "name": ... }` objects.
fn subject_names(subjects: Option<&Value>) -> Vec<String> {
    subjects
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|s| match s {
                    Value::String(name) => Some(name.clone()),
                    other => string_at(other, "name"),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn string_at(value: &Value, path: &str) -> Option<String> {
    let mut current = value;
    for segment in path.split('/') {
        current = current.get(segment)?;
    }
    current.as_str().map(str::to_owned)
}

fn leading_year(date: &str) -> Option<i64> {
    let digits: String = date.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        // Dates like "June 1, 1999" put the year last.
        date.split_whitespace()
            .last()
            .and_then(|s| s.parse().ok())
    } else {
        digits.parse().ok()
    }
}
