//! The shared storage handle.
//!
//! Wraps an in-memory `rusqlite` connection behind a mutex. All reads
//! and writes are synchronous and in-process; two requests cannot
//! interleave mid-statement. Any write not followed by [`Store::persist`]
//! is lost on restart.

use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::Connection;
use rusqlite::backup::Backup;
use rusqlite::types::{Value as SqlValue, ValueRef};
use serde_json::{Map, Value};

use bookshelf_core::error::{AppError, ErrorKind};
use bookshelf_core::result::AppResult;

/// A result row: column name → JSON value.
pub type Row = Map<String, Value>;

/// In-memory SQLite database with explicit file persistence.
#[derive(Debug)]
pub struct Store {
    /// The live in-memory connection.
    conn: Mutex<Connection>,
    /// File the database is serialized to.
    path: PathBuf,
}

impl Store {
    /// Opens the store, restoring the contents of `path` into memory
    /// when the file exists. A missing file means an empty database.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open_in_memory()
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to open in-memory database", e))?;

        if path.exists() {
            let src = Connection::open(&path).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to open database file '{}'", path.display()),
                    e,
                )
            })?;
            let backup = Backup::new(&src, &mut conn).map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to start database restore", e)
            })?;
            backup
                .run_to_completion(64, Duration::from_millis(0), None)
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to restore database", e)
                })?;
        }

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Serializes the in-memory database to the configured file.
    ///
    /// This is the durability boundary: callers must invoke it after
    /// any write that should survive a restart.
    pub fn persist(&self) -> AppResult<()> {
        let conn = self.conn.lock();
        let mut dst = Connection::open(&self.path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to open database file '{}'", self.path.display()),
                e,
            )
        })?;
        let backup = Backup::new(&conn, &mut dst).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to start database persist", e)
        })?;
        backup
            .run_to_completion(64, Duration::from_millis(0), None)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to persist database", e)
            })?;
        Ok(())
    }

    /// Read-only row fetch. Parameters are bound positionally; rows come
    /// back as column-name → JSON-value maps.
    pub fn query(&self, sql: &str, params: &[Value]) -> AppResult<Vec<Row>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to prepare query", e))?;
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();

        let bound = params.iter().map(json_to_sql);
        let mut rows = stmt
            .query(rusqlite::params_from_iter(bound))
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to execute query", e))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to step query", e))?
        {
            let mut map = Row::new();
            for (i, column) in columns.iter().enumerate() {
                let value = row.get_ref(i).map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to read column", e)
                })?;
                map.insert(column.clone(), sql_to_json(value));
            }
            out.push(map);
        }
        Ok(out)
    }

    /// Executes a single write statement and returns `last_insert_rowid()`.
    ///
    /// Does not persist; the durability boundary is an explicit
    /// [`Store::persist`] call.
    pub fn run(&self, sql: &str, params: &[Value]) -> AppResult<i64> {
        let conn = self.conn.lock();
        let bound = params.iter().map(json_to_sql);
        conn.execute(sql, rusqlite::params_from_iter(bound))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to execute statement", e)
            })?;
        Ok(conn.last_insert_rowid())
    }

    /// Executes a batch of statements (schema setup, multi-statement DDL).
    pub fn execute_batch(&self, sql: &str) -> AppResult<()> {
        let conn = self.conn.lock();
        conn.execute_batch(sql).map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to execute batch", e)
        })
    }

    /// Appends one row to the host-owned activity feed and persists.
    ///
    /// The feed is the only host-owned table plugins write into
    /// directly, so host and plugin actions share one timeline.
    pub fn log_activity(
        &self,
        event_type: &str,
        reader_name: Option<&str>,
        book_id: Option<i64>,
        book_title: Option<&str>,
        detail: Option<&str>,
    ) -> AppResult<()> {
        {
            let conn = self.conn.lock();
            conn.execute(
                "INSERT INTO activity (type, reader_name, book_id, book_title, detail) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![event_type, reader_name, book_id, book_title, detail],
            )
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to append activity event", e)
            })?;
        }
        self.persist()
    }

    /// File the database is serialized to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(*b as i64),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        // Arrays and objects are stored as JSON text, matching the
        // genres/trigger_warnings columns.
        other => SqlValue::Text(other.to_string()),
    }
}

fn sql_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(_) => Value::Null,
    }
}
