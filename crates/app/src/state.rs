//! Application state management

use std::path::{Path, PathBuf};

use projtrack_core::{Database, ProjectId, ProjectRepository};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AppError, Result};

const DB_FILE: &str = "projtrack.db";

/// Main application state
pub struct AppState {
    pub config: AppConfig,
    pub repo: ProjectRepository<Database>,
    data_dir: PathBuf,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let data_dir = config.data_dir()?;
        Self::open_at(config, data_dir)
    }

    pub fn open_at(config: AppConfig, data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;

        let db = Database::open(data_dir.join(DB_FILE))?;
        let repo = ProjectRepository::open(db)?;
        info!(data_dir = %data_dir.display(), projects = repo.len(), "Application state ready");

        Ok(Self {
            config,
            repo,
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve a full project id or a unique prefix of one
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<ProjectId> {
        let wanted = id_or_prefix.trim();
        if wanted.is_empty() {
            return Err(AppError::ProjectNotFound(id_or_prefix.to_string()));
        }

        let exact = ProjectId::from(wanted);
        if self.repo.get(&exact).is_some() {
            return Ok(exact);
        }

        let mut matches = self
            .repo
            .projects()
            .iter()
            .filter(|p| p.id.as_str().starts_with(wanted));
        match (matches.next(), matches.next()) {
            (Some(project), None) => Ok(project.id.clone()),
            (Some(_), Some(_)) => Err(AppError::AmbiguousId(wanted.to_string())),
            (None, _) => Err(AppError::ProjectNotFound(wanted.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(dir: &Path) -> AppState {
        AppState::open_at(AppConfig::default(), dir.to_path_buf()).unwrap()
    }

    #[test]
    fn test_first_run_seeds_projects() {
        let dir = tempfile::tempdir().unwrap();
        let state = open(&dir.path().join("data"));
        assert_eq!(state.repo.len(), 6);
        assert!(state.data_dir().join(DB_FILE).exists());
    }

    #[test]
    fn test_resolve_id() {
        let dir = tempfile::tempdir().unwrap();
        let state = open(dir.path());
        let id = state.repo.projects()[2].id.clone();

        assert_eq!(state.resolve_id(id.as_str()).unwrap(), id);
        assert_eq!(state.resolve_id(&id.as_str()[..12]).unwrap(), id);
        assert!(matches!(
            state.resolve_id("no-such-project"),
            Err(AppError::ProjectNotFound(_))
        ));
        assert!(matches!(state.resolve_id(""), Err(AppError::ProjectNotFound(_))));
    }

    #[test]
    fn test_state_reopens_same_data() {
        let dir = tempfile::tempdir().unwrap();
        let ids: Vec<_> = {
            let state = open(dir.path());
            state.repo.projects().iter().map(|p| p.id.clone()).collect()
        };
        let reopened = open(dir.path());
        let again: Vec<_> = reopened.repo.projects().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, again);
    }
}
