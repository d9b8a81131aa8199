//! SQLite document backend.
//!
//! Records live in a single `documents` table keyed by `(collection, id)`,
//! with field data stored as a JSON object. Filters are evaluated in Rust so
//! query semantics match the in-memory backend exactly.

mod row;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, ErrorCode, OptionalExtension};
use uuid::Uuid;

use crate::error::{Result, SignupError};
use crate::storage::filter::Filter;
use crate::storage::traits::DocumentBackend;
use crate::storage::types::{format_timestamp, Document, Fields};

use row::DocumentRow;

/// On-disk format version written to the `meta` table.
pub const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS documents (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        data_json TEXT NOT NULL,

        UNIQUE(collection, id)
    );

    CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);
"#;

/// SQLite-backed document store.
pub struct SqliteBackend {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open the store at `path`, creating the file and schema if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SignupError::Store(format!(
                        "Failed to create store directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened sqlite document store");
        Self::initialize(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn, None)
    }

    fn initialize(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        let now = format_timestamp(Utc::now());
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?1), ('created_at', ?2)",
            [FORMAT_VERSION, now.as_str()],
        )?;

        let version = Self::read_meta(&conn, "format_version")?;
        if version.as_deref() != Some(FORMAT_VERSION) {
            return Err(SignupError::Store(format!(
                "Unsupported store format version: {}",
                version.unwrap_or_else(|| "missing".to_string())
            )));
        }

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Location of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Format version recorded in the store.
    pub fn format_version(&self) -> Result<String> {
        let conn = self.lock_conn()?;
        Self::read_meta(&conn, "format_version")?
            .ok_or_else(|| SignupError::Store("Store metadata missing format_version".to_string()))
    }

    fn read_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
        Ok(conn
            .query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SignupError::Store("SQLite connection poisoned".to_string()))
    }

    fn encode(fields: &Fields) -> Result<String> {
        serde_json::to_string(fields)
            .map_err(|e| SignupError::Store(format!("Failed to encode document: {}", e)))
    }

    fn load_collection(conn: &Connection, collection: &str) -> Result<Vec<Document>> {
        let mut stmt = conn.prepare(
            "SELECT id, data_json FROM documents WHERE collection = ?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map([collection], DocumentRow::from_row)?;

        let mut docs = Vec::new();
        for row in rows {
            docs.push(Document::try_from(row?)?);
        }
        Ok(docs)
    }

    fn load_one(conn: &Connection, collection: &str, id: &str) -> Result<Option<Document>> {
        let row = conn
            .query_row(
                "SELECT id, data_json FROM documents WHERE collection = ?1 AND id = ?2",
                [collection, id],
                DocumentRow::from_row,
            )
            .optional()?;
        row.map(Document::try_from).transpose()
    }
}

impl DocumentBackend for SqliteBackend {
    fn insert(&self, collection: &str, fields: Fields) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.insert_with_id(collection, &id, fields)?;
        Ok(id)
    }

    fn insert_with_id(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let data_json = Self::encode(&fields)?;
        let conn = self.lock_conn()?;

        let result = conn.execute(
            "INSERT INTO documents (collection, id, data_json) VALUES (?1, ?2, ?3)",
            [collection, id, data_json.as_str()],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(SignupError::AlreadyExists(format!(
                    "Document {} in {}",
                    id, collection
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let conn = self.lock_conn()?;
        Self::load_one(&conn, collection, id)
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let conn = self.lock_conn()?;
        Self::load_collection(&conn, collection)
    }

    fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let conn = self.lock_conn()?;
        let docs = Self::load_collection(&conn, collection)?;
        Ok(docs.into_iter().filter(|doc| filter.matches(doc)).collect())
    }

    fn merge(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let mut doc = Self::load_one(&tx, collection, id)?.ok_or_else(|| {
            SignupError::NotFound(format!("Document {} in {}", id, collection))
        })?;
        doc.fields.extend(fields);
        let data_json = Self::encode(&doc.fields)?;

        tx.execute(
            "UPDATE documents SET data_json = ?1 WHERE collection = ?2 AND id = ?3",
            [data_json.as_str(), collection, id],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            [collection, id],
        )?;
        Ok(())
    }
}
