//! Document-store adapter backed by SQLite.
//!
//! Unlike the counter backends, the storage engine assigns the keys here:
//! `key INTEGER PRIMARY KEY AUTOINCREMENT`, starting at 1. The connection
//! is opened lazily per operation, never in the constructor, and released
//! on every exit path; a leaked handle would block later schema work.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{Connection, params};
use tracing::{debug, warn};

use crate::core::adapter::StorageAdapter;
use crate::core::entry::{Entry, timestamp_now};
use crate::core::error::BackendUnavailable;

const NAME: &str = "documents";

const DOCUMENTS_SCHEMA: &str =
    "CREATE TABLE documents (key INTEGER PRIMARY KEY AUTOINCREMENT, value TEXT NOT NULL)";

pub struct DocumentStore {
    db_path: PathBuf,
}

impl DocumentStore {
    /// Remembers the database location. No file or connection is touched
    /// until the first operation.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Open-or-create: the schema is created exactly once, when the table
    /// does not exist yet (first use, or first use after a clear).
    fn open(path: &Path) -> anyhow::Result<Connection> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        if !conn.table_exists(None, "documents")? {
            debug!("creating document schema at {}", path.display());
            conn.execute(DOCUMENTS_SCHEMA, ())?;
        }
        Ok(conn)
    }

    /// One unit of work against a scoped connection. The handle is closed
    /// whether `op` succeeded or not.
    async fn with_database<T, F>(&self, op: F) -> Result<T, BackendUnavailable>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.db_path.clone();
        let result = tokio::task::spawn_blocking(move || -> anyhow::Result<T> {
            let conn = Self::open(&path)?;
            let result = op(&conn);
            if let Err((_conn, err)) = conn.close() {
                warn!("closing document database failed: {}", err);
            }
            Ok(result?)
        })
        .await;

        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(BackendUnavailable::new(NAME, err)),
            Err(join_err) => Err(BackendUnavailable::new(NAME, join_err)),
        }
    }
}

#[async_trait]
impl StorageAdapter for DocumentStore {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn list(&self) -> Result<Vec<Entry>, BackendUnavailable> {
        self.with_database(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM documents ORDER BY key ASC")?;
            let rows = stmt.query_map((), |row| {
                let key: i64 = row.get(0)?;
                let value: String = row.get(1)?;
                Ok(Entry::new(key.to_string(), value))
            })?;
            rows.collect()
        })
        .await
    }

    async fn add(&self) -> Result<(), BackendUnavailable> {
        let value = timestamp_now();
        self.with_database(move |conn| {
            conn.execute("INSERT INTO documents (value) VALUES (?1)", params![value])?;
            Ok(())
        })
        .await
    }

    /// Whole-database delete; the next `add` recreates the schema.
    async fn clear(&self) -> Result<(), BackendUnavailable> {
        let path = self.db_path.clone();
        let result = tokio::task::spawn_blocking(move || match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(anyhow::Error::from(err)),
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(BackendUnavailable::new(NAME, err)),
            Err(join_err) => Err(BackendUnavailable::new(NAME, join_err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> DocumentStore {
        DocumentStore::new(dir.path().join("documents.sqlite3"))
    }

    #[tokio::test]
    async fn first_add_creates_schema_and_inserts_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add().await.unwrap();
        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "1");
        let ts: i64 = entries[0].value.as_deref().unwrap().parse().unwrap();
        assert!(ts > 0);
    }

    #[tokio::test]
    async fn listing_a_nonexistent_database_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(&dir).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn keys_ascend_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        for _ in 0..3 {
            store.add().await.unwrap();
        }
        let keys: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let first = store(&dir);
        first.add().await.unwrap();
        let stored = first.list().await.unwrap();

        let second = store(&dir);
        assert_eq!(second.list().await.unwrap(), stored);
    }

    #[tokio::test]
    async fn clear_deletes_the_database_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add().await.unwrap();

        store.clear().await.unwrap();
        assert!(!dir.path().join("documents.sqlite3").exists());
        assert!(store.list().await.unwrap().is_empty());

        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_after_clear_recreates_the_schema() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.add().await.unwrap();
        store.clear().await.unwrap();

        store.add().await.unwrap();
        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        // A fresh database restarts the key sequence.
        assert_eq!(entries[0].key, "1");
    }

    #[tokio::test]
    async fn construction_never_touches_the_backend() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        // A path that cannot exist: its parent is a regular file. The
        // constructor must still succeed; only the first operation fails.
        let store = DocumentStore::new(blocker.join("db.sqlite3"));
        let err = store.add().await.unwrap_err();
        assert_eq!(err.backend(), "documents");
    }
}
