//! Developer guardrails and invariants
//!
//! Stored, pulled and patched records are not re-validated, so their
//! anomalies are reported through `warn!` and never abort. Debug assertions
//! cover only what the repository itself guarantees.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{District, Project, ProjectId};

/// A project state the form layer would not have produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    BlankName(ProjectId),
    ForeignLac {
        id: ProjectId,
        lac: String,
        district: District,
    },
    UpdatedBeforeCreated(ProjectId),
    DuplicateId(ProjectId),
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::BlankName(id) => write!(f, "project {} has a blank name", id),
            Anomaly::ForeignLac { id, lac, district } => {
                write!(f, "project {} has LAC {:?} outside district {}", id, lac, district)
            }
            Anomaly::UpdatedBeforeCreated(id) => {
                write!(f, "project {} was updated before it was created", id)
            }
            Anomaly::DuplicateId(id) => write!(f, "project id {} appears more than once", id),
        }
    }
}

pub fn project_anomalies(project: &Project) -> Vec<Anomaly> {
    let mut found = Vec::new();
    if project.name.trim().is_empty() {
        found.push(Anomaly::BlankName(project.id.clone()));
    }
    // An empty LAC is allowed (cleared after a district change)
    if !project.lac.is_empty() && !project.district.contains_lac(&project.lac) {
        found.push(Anomaly::ForeignLac {
            id: project.id.clone(),
            lac: project.lac.clone(),
            district: project.district,
        });
    }
    if project.updated_at < project.created_at {
        found.push(Anomaly::UpdatedBeforeCreated(project.id.clone()));
    }
    found
}

pub fn collection_anomalies(projects: &[Project]) -> Vec<Anomaly> {
    let mut seen = HashSet::with_capacity(projects.len());
    let mut found = Vec::new();
    for project in projects {
        found.extend(project_anomalies(project));
        if !seen.insert(&project.id) {
            found.push(Anomaly::DuplicateId(project.id.clone()));
        }
    }
    found
}

/// Log every anomaly in a collection; returns how many were found
pub fn warn_on_anomalies(projects: &[Project]) -> usize {
    let found = collection_anomalies(projects);
    for anomaly in &found {
        warn!(%anomaly, "Project data anomaly");
    }
    found.len()
}

/// A project straight out of `add`
pub fn assert_fresh_project(project: &Project) {
    debug_assert!(
        !project.id.as_str().is_empty(),
        "Project {:?} was given an empty id",
        project.name
    );
    debug_assert!(
        project.created_at == project.updated_at,
        "Project {} has diverging timestamps at creation",
        project.id
    );
}

/// `updated_at` moved strictly forward during a mutation
pub fn assert_touched(before: DateTime<Utc>, project: &Project) {
    debug_assert!(
        project.updated_at > before,
        "Project {} timestamp did not advance ({} -> {})",
        project.id,
        before,
        project.updated_at
    );
}
