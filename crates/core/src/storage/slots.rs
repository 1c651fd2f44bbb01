//! Named key-value slots
//!
//! Each slot holds one serialized document and is always overwritten whole.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, instrument};

use crate::error::Result;

fn written_at(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))
}

/// Metadata about a stored slot
#[derive(Debug, Clone)]
pub struct SlotInfo {
    pub key: String,
    pub size_bytes: u64,
    pub updated_at: DateTime<Utc>,
}

/// Slot store
pub struct SlotStore<'a> {
    conn: &'a Connection,
}

impl<'a> SlotStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read a slot's value
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrite a slot's value
    #[instrument(skip(self, value), fields(size = value.len()))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_slots (key, value, updated_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, value, Utc::now().to_rfc3339(), value.len() as i64],
        )?;
        debug!(key, "Slot written");
        Ok(())
    }

    /// Remove a slot; returns whether it existed
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM kv_slots WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    /// Describe a slot without loading its value
    pub fn info(&self, key: &str) -> Result<Option<SlotInfo>> {
        let row = self
            .conn
            .query_row(
                "SELECT key, size_bytes, updated_at FROM kv_slots WHERE key = ?1",
                params![key],
                |row| {
                    Ok(SlotInfo {
                        key: row.get(0)?,
                        size_bytes: row.get::<_, i64>(1)? as u64,
                        updated_at: written_at(&row.get::<_, String>(2)?)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_slot_set_get() {
        let db = Database::open_in_memory().unwrap();
        let store = SlotStore::new(&db.conn);

        store.set("greeting", "[1,2,3]").unwrap();
        assert_eq!(store.get("greeting").unwrap().as_deref(), Some("[1,2,3]"));

        store.set("greeting", "[]").unwrap();
        assert_eq!(store.get("greeting").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_slot_not_found() {
        let db = Database::open_in_memory().unwrap();
        let store = SlotStore::new(&db.conn);

        assert!(store.get("missing").unwrap().is_none());
        assert!(store.info("missing").unwrap().is_none());
        assert!(!store.remove("missing").unwrap());
    }

    #[test]
    fn test_slot_info() {
        let db = Database::open_in_memory().unwrap();
        let store = SlotStore::new(&db.conn);

        store.set("data", "abcdef").unwrap();
        let info = store.info("data").unwrap().unwrap();
        assert_eq!(info.key, "data");
        assert_eq!(info.size_bytes, 6);
        assert!(store.remove("data").unwrap());
    }

    #[test]
    fn test_written_at_rejects_garbage() {
        assert!(written_at("2024-12-20T10:00:00+00:00").is_ok());
        assert!(written_at("yesterday").is_err());
    }
}
