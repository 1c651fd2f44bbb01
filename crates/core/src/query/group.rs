//! Partitioning of a sorted project list into labelled groups

use serde::{Deserialize, Serialize};

use crate::models::Project;

/// Label of the single group produced when grouping is off
pub const ALL_PROJECTS_GROUP: &str = "All Projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    #[default]
    None,
    DesignStatus,
    District,
    Lac,
}

impl GroupBy {
    pub fn label(self) -> &'static str {
        match self {
            GroupBy::None => "None",
            GroupBy::DesignStatus => "Design Status",
            GroupBy::District => "District",
            GroupBy::Lac => "LAC",
        }
    }

    /// Group key for a project; the literal field value as stored
    pub fn key_of(self, project: &Project) -> String {
        match self {
            GroupBy::None => ALL_PROJECTS_GROUP.to_string(),
            GroupBy::DesignStatus => project.design_status.code(),
            GroupBy::District => project.district.name().to_string(),
            GroupBy::Lac => project.lac.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup<'a> {
    pub key: String,
    pub projects: Vec<&'a Project>,
}

impl ProjectGroup<'_> {
    /// Header text, e.g. "Kannur (3)"
    pub fn heading(&self) -> String {
        format!("{} ({})", self.key, self.projects.len())
    }
}

/// Split into groups ordered by first appearance, members keeping their
/// relative order
pub fn group_projects<'a>(projects: Vec<&'a Project>, by: GroupBy) -> Vec<ProjectGroup<'a>> {
    let mut groups: Vec<ProjectGroup<'a>> = Vec::new();
    for project in projects {
        let key = by.key_of(project);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.projects.push(project),
            None => groups.push(ProjectGroup {
                key,
                projects: vec![project],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::District;
    use crate::storage::seed_projects;

    #[test]
    fn test_no_grouping_yields_single_group() {
        let projects = seed_projects();
        let groups = group_projects(projects.iter().collect(), GroupBy::None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, ALL_PROJECTS_GROUP);
        assert_eq!(groups[0].projects.len(), 6);
        assert_eq!(groups[0].heading(), "All Projects (6)");
    }

    #[test]
    fn test_group_by_status_first_seen_order() {
        let projects = seed_projects();
        let groups = group_projects(projects.iter().collect(), GroupBy::DesignStatus);
        assert_eq!(groups.len(), 6);
        assert!(groups.iter().all(|g| g.projects.len() == 1));
        assert_eq!(groups[0].key, "04 Detailed Design Ongoing");
        assert_eq!(groups[1].key, "03 Tentative Design Issued");
    }

    #[test]
    fn test_group_members_keep_order() {
        let mut projects = seed_projects();
        projects[2].district = District::Kannur;
        projects[4].district = District::Kannur;

        let groups = group_projects(projects.iter().collect(), GroupBy::District);
        let kannur = groups.iter().find(|g| g.key == "Kannur").unwrap();
        let names: Vec<_> = kannur.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Panchayat Office Building",
                "Community Health Center",
                "Police Station Renovation",
            ]
        );
        assert_eq!(kannur.heading(), "Kannur (3)");
        assert_eq!(groups.len(), 4);

        let total: usize = groups.iter().map(|g| g.projects.len()).sum();
        assert_eq!(total, projects.len());
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        assert!(group_projects(Vec::new(), GroupBy::None).is_empty());
        assert!(group_projects(Vec::new(), GroupBy::Lac).is_empty());
    }
}
