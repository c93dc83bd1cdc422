use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::services::vocabulary::VOCABULARY_VERSION;
use crate::types::TrackerData;

const SNAPSHOT_KEY: &str = "pe_tracker_data";
const SCHEMA_VERSION: i64 = 1;

/// Load/save lifecycle for the dashboard snapshot. Extraction code never touches this.
pub trait Repository {
    fn load(&self) -> Result<Option<TrackerData>, StoreError>;
    fn save(&self, data: &TrackerData) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// SQLite key-value store holding the snapshot as one JSON blob.
pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    pub fn new(db_path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&db_path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT DEFAULT CURRENT_TIMESTAMP
            );
            INSERT INTO schema_version (version) SELECT 1 WHERE NOT EXISTS (SELECT 1 FROM schema_version LIMIT 1);
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                vocabulary_version INTEGER NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )?;
        let current_version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(SCHEMA_VERSION);
        tracing::debug!(schema_version = current_version, "snapshot store ready");
        Ok(Db {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Keyword-table version the stored snapshot was extracted with.
    pub fn stored_vocabulary_version(&self) -> Result<Option<u32>, StoreError> {
        let conn = self.lock()?;
        let version = conn
            .query_row(
                "SELECT vocabulary_version FROM kv WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(version.map(|v| v as u32))
    }
}

impl Repository for Db {
    fn load(&self) -> Result<Option<TrackerData>, StoreError> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, data: &TrackerData) -> Result<(), StoreError> {
        let json = serde_json::to_string(data)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, vocabulary_version, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))",
            params![SNAPSHOT_KEY, json, VOCABULARY_VERSION as i64],
        )?;
        tracing::debug!(
            funds = data.funds.len(),
            interactions = data.interactions.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![SNAPSHOT_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_nothing() {
        let db = Db::open_in_memory().unwrap();
        assert_eq!(db.load().unwrap(), None);
        assert_eq!(db.stored_vocabulary_version().unwrap(), None);
    }

    #[test]
    fn save_replaces_and_clear_removes() {
        let db = Db::open_in_memory().unwrap();
        let mut data = TrackerData {
            file_name: Some("a.xlsx".to_string()),
            ..TrackerData::default()
        };
        db.save(&data).unwrap();
        data.file_name = Some("b.xlsx".to_string());
        db.save(&data).unwrap();
        assert_eq!(db.load().unwrap(), Some(data));
        assert_eq!(db.stored_vocabulary_version().unwrap(), Some(VOCABULARY_VERSION));
        db.clear().unwrap();
        assert_eq!(db.load().unwrap(), None);
    }
}
