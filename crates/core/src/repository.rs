//! Project repository
//!
//! Owns the in-memory project collection. Every mutation writes the full
//! collection through the configured `ProjectStore`; the in-memory copy stays
//! authoritative even if that write fails.

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::invariants::{assert_fresh_project, assert_touched, warn_on_anomalies};
use crate::models::{HistoryEntry, Project, ProjectDraft, ProjectId, ProjectPatch};
use crate::storage::ProjectStore;

/// In-memory project collection with write-through persistence
pub struct ProjectRepository<S: ProjectStore> {
    store: S,
    projects: Vec<Project>,
}

impl<S: ProjectStore> ProjectRepository<S> {
    /// Load the collection from the store
    #[instrument(skip(store))]
    pub fn open(store: S) -> Result<Self> {
        let projects = store.load_all()?;
        warn_on_anomalies(&projects);
        info!(count = projects.len(), "Project repository ready");
        Ok(Self { store, projects })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a project from a draft, assigning id and timestamps
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn add(&mut self, draft: ProjectDraft) -> Result<Project> {
        let project = draft.into_project(ProjectId::generate(), Utc::now());
        assert_fresh_project(&project);
        self.projects.push(project.clone());
        debug!(id = %project.id, "Project added");
        self.persist()?;
        Ok(project)
    }

    /// Add a copy of an existing project under a new id
    #[instrument(skip(self))]
    pub fn duplicate(&mut self, id: &ProjectId) -> Result<Option<Project>> {
        let Some(source) = self.get(id) else {
            return Ok(None);
        };
        let draft = ProjectDraft::from_project(source);
        self.add(draft).map(Some)
    }

    /// Merge a partial edit; returns false when the id is unknown
    #[instrument(skip(self, patch))]
    pub fn update(&mut self, id: &ProjectId, patch: ProjectPatch) -> Result<bool> {
        let Some(project) = self.projects.iter_mut().find(|p| &p.id == id) else {
            debug!("Update ignored, no such project");
            return Ok(false);
        };
        let before = project.updated_at;
        patch.apply_to(project);
        project.touch();
        assert_touched(before, project);
        warn_on_anomalies(std::slice::from_ref(project));
        self.persist()?;
        Ok(true)
    }

    /// Replace a project's whole history; returns false when the id is unknown
    #[instrument(skip(self, history), fields(entries = history.len()))]
    pub fn update_history(&mut self, id: &ProjectId, history: Vec<HistoryEntry>) -> Result<bool> {
        let Some(project) = self.projects.iter_mut().find(|p| &p.id == id) else {
            return Ok(false);
        };
        let before = project.updated_at;
        project.history = history;
        project.touch();
        assert_touched(before, project);
        self.persist()?;
        Ok(true)
    }

    /// Remove a project; returns false when the id is unknown
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &ProjectId) -> Result<bool> {
        let before = self.projects.len();
        self.projects.retain(|p| &p.id != id);
        if self.projects.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Unconditionally overwrite the collection (after a pull)
    #[instrument(skip(self, projects), fields(count = projects.len()))]
    pub fn replace_all(&mut self, projects: Vec<Project>) -> Result<()> {
        warn_on_anomalies(&projects);
        self.projects = projects;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.store.save_all(&self.projects)
    }
}
