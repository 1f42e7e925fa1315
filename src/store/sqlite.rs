//! SQLite-backed event log.
//!
//! Rows are keyed by an autoincrement id, which is the insertion order used by
//! [`EventStore::latest`]. rusqlite is synchronous, so every call runs inside
//! `tokio::task::spawn_blocking`.

use std::{
    any::Any,
    path::Path,
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::events::{EventAction, WebhookEvent};

use super::{EventStore, StoreError};

const CURRENT_SCHEMA_VERSION: i64 = 1;
const IN_MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone)]
pub struct SqliteEventStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEventStore {
    /// Open (or create) the database at `path` and apply pending migrations.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy();

        if path_str != IN_MEMORY_PATH {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::backend(
                        "create database directory",
                        format!("{}: {}", parent.display(), e),
                    )
                })?;
            }
        }

        let conn =
            Connection::open(path).map_err(|e| StoreError::backend("open database", e))?;

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(|e| StoreError::backend("set journal_mode", e))?;
        tracing::debug!(journal_mode = %journal_mode, path = %path_str, "database opened");

        conn.execute_batch(
            r#"
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            CREATE TABLE IF NOT EXISTS schema_version (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                version INTEGER NOT NULL
            );
            "#,
        )
        .map_err(|e| StoreError::backend("configure database", e))?;

        let current_version: i64 = conn
            .query_row(
                "SELECT version FROM schema_version WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::backend("get schema version", e))?
            .unwrap_or(0);

        Self::run_migrations(&conn, current_version)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn new_in_memory() -> Result<Self, StoreError> {
        Self::new(IN_MEMORY_PATH)
    }

    fn run_migrations(conn: &Connection, from_version: i64) -> Result<(), StoreError> {
        if from_version > CURRENT_SCHEMA_VERSION {
            return Err(StoreError::backend(
                "schema version",
                format!(
                    "database schema version {} is newer than supported version {}",
                    from_version, CURRENT_SCHEMA_VERSION
                ),
            ));
        }

        if from_version == CURRENT_SCHEMA_VERSION {
            return Ok(());
        }

        if from_version < 1 {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS webhook_events (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    request_id TEXT NOT NULL,
                    author TEXT NOT NULL,
                    action TEXT NOT NULL,
                    from_branch TEXT NOT NULL,
                    to_branch TEXT NOT NULL,
                    timestamp TEXT NOT NULL,
                    formatted_message TEXT NOT NULL
                );
                "#,
            )
            .map_err(|e| StoreError::backend("migration v1", e))?;
        }

        conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?1)",
            params![CURRENT_SCHEMA_VERSION],
        )
        .map_err(|e| StoreError::backend("update schema version", e))?;

        tracing::info!(
            from = from_version,
            to = CURRENT_SCHEMA_VERSION,
            "database migrated"
        );

        Ok(())
    }

    fn lock<'a>(
        conn: &'a Mutex<Connection>,
        operation: &str,
    ) -> Result<MutexGuard<'a, Connection>, StoreError> {
        conn.lock().map_err(|e| StoreError::backend(operation, e))
    }
}

/// Outer error comes from the driver, inner one from an unknown stored action.
fn row_to_event(row: &Row<'_>) -> rusqlite::Result<Result<WebhookEvent, StoreError>> {
    let action: String = row.get(2)?;
    let action = match EventAction::from_str(&action) {
        Ok(action) => action,
        Err(_) => {
            return Ok(Err(StoreError::Corruption(format!(
                "unknown action '{}'",
                action
            ))))
        }
    };

    Ok(Ok(WebhookEvent {
        request_id: row.get(0)?,
        author: row.get(1)?,
        action,
        from_branch: row.get(3)?,
        to_branch: row.get(4)?,
        timestamp: row.get(5)?,
        formatted_message: row.get(6)?,
    }))
}

#[async_trait]
impl EventStore for SqliteEventStore {
    #[tracing::instrument(skip(self))]
    async fn insert(&self, event: WebhookEvent) -> Result<(), StoreError> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = Self::lock(&conn, "insert")?;

            conn.execute(
                "INSERT INTO webhook_events (request_id, author, action, from_branch,
                                             to_branch, timestamp, formatted_message)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    event.request_id,
                    event.author,
                    event.action.as_ref(),
                    event.from_branch,
                    event.to_branch,
                    event.timestamp,
                    event.formatted_message
                ],
            )
            .map_err(|e| StoreError::backend("insert", e))?;

            Ok(())
        })
        .await
        .map_err(|e| StoreError::backend("insert", e))?
    }

    #[tracing::instrument(skip(self))]
    async fn latest(&self, limit: usize) -> Result<Vec<WebhookEvent>, StoreError> {
        let conn = self.conn.clone();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        tokio::task::spawn_blocking(move || {
            let conn = Self::lock(&conn, "latest")?;

            let mut stmt = conn
                .prepare(
                    "SELECT request_id, author, action, from_branch, to_branch,
                            timestamp, formatted_message
                     FROM webhook_events ORDER BY id DESC LIMIT ?1",
                )
                .map_err(|e| StoreError::backend("latest", e))?;

            let rows = stmt
                .query_map(params![limit], row_to_event)
                .map_err(|e| StoreError::backend("latest", e))?;

            let mut events = Vec::new();
            for row in rows {
                events.push(row.map_err(|e| StoreError::backend("latest", e))??);
            }

            Ok(events)
        })
        .await
        .map_err(|e| StoreError::backend("latest", e))?
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
