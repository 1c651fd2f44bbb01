//! Project collection persistence
//!
//! The whole collection lives in one slot as a JSON array. Loading never
//! fails on bad data: anything unusable is replaced by the seed dataset,
//! which is written back straight away.

use rusqlite::Connection;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::seed::seed_projects;
use super::slots::SlotStore;
use crate::error::Result;
use crate::models::Project;

/// Slot holding the serialized project collection
pub const PROJECTS_SLOT: &str = "projects-tracker-data";

/// Why a stored collection was rejected
#[derive(Debug)]
pub enum SlotProblem {
    Malformed(serde_json::Error),
    NotAnArray,
    Empty,
    LegacySchema,
    InvalidRecord(serde_json::Error),
}

impl std::fmt::Display for SlotProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotProblem::Malformed(e) => write!(f, "malformed JSON: {}", e),
            SlotProblem::NotAnArray => write!(f, "stored value is not an array"),
            SlotProblem::Empty => write!(f, "stored collection is empty"),
            SlotProblem::LegacySchema => write!(f, "legacy schema without asDetails"),
            SlotProblem::InvalidRecord(e) => write!(f, "invalid project record: {}", e),
        }
    }
}

/// Decode a stored collection, rejecting anything that is not current schema
pub fn decode_projects(raw: &str) -> std::result::Result<Vec<Project>, SlotProblem> {
    let value: Value = serde_json::from_str(raw).map_err(SlotProblem::Malformed)?;
    let items = value.as_array().ok_or(SlotProblem::NotAnArray)?;
    let first = items.first().ok_or(SlotProblem::Empty)?;

    // Current records carry a nested asDetails object
    if !first.get("asDetails").is_some_and(Value::is_object) {
        return Err(SlotProblem::LegacySchema);
    }

    serde_json::from_value(value).map_err(SlotProblem::InvalidRecord)
}

/// Project collection store backed by a slot
pub struct ProjectSlot<'a> {
    slots: SlotStore<'a>,
}

impl<'a> ProjectSlot<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            slots: SlotStore::new(conn),
        }
    }

    /// Load the collection, restoring seed data when needed
    #[instrument(skip(self))]
    pub fn load_all(&self) -> Result<Vec<Project>> {
        let Some(raw) = self.slots.get(PROJECTS_SLOT)? else {
            info!("No stored projects, loading sample data");
            return self.reseed();
        };

        match decode_projects(&raw) {
            Ok(projects) => {
                info!(count = projects.len(), "Loaded projects");
                Ok(projects)
            }
            Err(problem) => {
                warn!(%problem, "Stored projects unusable, loading sample data");
                self.reseed()
            }
        }
    }

    /// Overwrite the collection
    #[instrument(skip(self, projects), fields(count = projects.len()))]
    pub fn save_all(&self, projects: &[Project]) -> Result<()> {
        let raw = serde_json::to_string(projects)?;
        self.slots.set(PROJECTS_SLOT, &raw)
    }

    fn reseed(&self) -> Result<Vec<Project>> {
        let projects = seed_projects();
        self.save_all(&projects)?;
        Ok(projects)
    }
}
