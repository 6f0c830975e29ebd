/// Key-value preference stores the widget reads its course list from

mod error;

pub use error::StoreError;

use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError, RwLock};
use tracing::{debug, warn};

/// Name of the preference file the app shares with its home screen widget.
pub const WIDGET_PREFERENCES: &str = "HomeWidgetPreferences";

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS preferences (
    namespace TEXT NOT NULL,
    key       TEXT NOT NULL,
    value     TEXT NOT NULL,
    PRIMARY KEY (namespace, key)
);";

/// Read access to a string-valued key-value store.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory store, mostly useful for tests and ephemeral setups.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// SQLite-backed store. All keys live in a single table, partitioned by
/// the preference namespace.
pub struct SqlitePreferenceStore {
    db: Mutex<Connection>,
    namespace: String,
}

impl SqlitePreferenceStore {
    /// Opens (or creates) the database at `db_path` and initializes the schema.
    pub fn open(db_path: &Path, namespace: impl Into<String>) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn, namespace)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(namespace: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, namespace)
    }

    fn with_connection(conn: Connection, namespace: impl Into<String>) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
            namespace: namespace.into(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Inserts or replaces the value stored under `key`.
    pub fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
        db.execute(
            "INSERT INTO preferences (namespace, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (namespace, key) DO UPDATE SET value = excluded.value",
            (&self.namespace, key, value),
        )?;
        debug!("Stored preference {}/{}", self.namespace, key);
        Ok(())
    }

    /// Removes `key`, returning true if it existed.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
        let removed = db.execute(
            "DELETE FROM preferences WHERE namespace = ?1 AND key = ?2",
            (&self.namespace, key),
        )?;
        Ok(removed > 0)
    }

    /// Looks up `key`, keeping database failures visible.
    pub fn try_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
        let value = db
            .query_row(
                "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
                (&self.namespace, key),
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                // An unreadable store is treated like an empty one
                warn!("Failed to read preference {}/{}: {}", self.namespace, key, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for SqlitePreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePreferenceStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
