//! Versioned schema upgrades for the local database
//!
//! Each step runs once, inside its own transaction, and is recorded in
//! `schema_migrations`.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{info, instrument};

use crate::error::Result;

struct SchemaStep {
    version: u32,
    summary: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        summary: "Key-value slots",
        sql: "CREATE TABLE IF NOT EXISTS kv_slots (
                  key TEXT PRIMARY KEY,
                  value TEXT NOT NULL,
                  updated_at TEXT NOT NULL
              );",
    },
    SchemaStep {
        version: 2,
        summary: "Track slot payload size",
        sql: "ALTER TABLE kv_slots ADD COLUMN size_bytes INTEGER NOT NULL DEFAULT 0;",
    },
];

/// Highest applied version, 0 for a fresh database
pub(crate) fn schema_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

/// Bring the schema up to the latest version
#[instrument(skip(conn))]
pub(crate) fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
             version INTEGER PRIMARY KEY,
             description TEXT NOT NULL,
             applied_at TEXT NOT NULL
         );",
    )?;

    let from = schema_version(conn)?;
    let pending = STEPS.iter().filter(|step| step.version > from);

    for step in pending {
        info!(version = step.version, summary = step.summary, "Upgrading local schema");
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(step.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
            params![step.version, step.summary, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
    }

    let to = schema_version(conn)?;
    if to > from {
        info!(from, to, "Local schema upgraded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latest() -> u32 {
        STEPS.last().map(|s| s.version).unwrap_or(0)
    }

    #[test]
    fn test_fresh_database_reaches_latest() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), latest());
    }

    #[test]
    fn test_migrate_twice_is_harmless() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), latest());

        let applied: u32 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, latest());
    }

    #[test]
    fn test_steps_are_numbered_from_one() {
        for (i, step) in STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, i + 1, "{}", step.summary);
        }
    }
}
