//! SQLite-backed local storage for Projtrack

pub mod documents;
mod migrations;
mod projects;
mod seed;
mod slots;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

use crate::error::Result;
use crate::models::Project;

pub use documents::{project_from_document, project_to_document, DocumentFields};
pub use projects::{decode_projects, ProjectSlot, SlotProblem, PROJECTS_SLOT};
pub use seed::seed_projects;
pub use slots::{SlotInfo, SlotStore};
pub use traits::ProjectStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database file, creating and upgrading it as needed
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Private in-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)?;
        Ok(Self { conn })
    }

    pub fn schema_version(&self) -> Result<u32> {
        migrations::schema_version(&self.conn)
    }

    /// Raw key-value slot store
    pub fn slots(&self) -> SlotStore<'_> {
        SlotStore::new(&self.conn)
    }

    /// Get the project collection store
    pub fn projects(&self) -> ProjectSlot<'_> {
        ProjectSlot::new(&self.conn)
    }
}

impl ProjectStore for Database {
    fn load_all(&self) -> Result<Vec<Project>> {
        self.projects().load_all()
    }

    fn save_all(&self, projects: &[Project]) -> Result<()> {
        self.projects().save_all(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projtrack.db");

        let ids: Vec<_> = {
            let db = Database::open(&path).unwrap();
            db.load_all().unwrap().into_iter().map(|p| p.id).collect()
        };

        let db = Database::open(&path).unwrap();
        let reopened: Vec<_> = db.load_all().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, reopened);
        assert!(db.schema_version().unwrap() >= 1);
    }
}
