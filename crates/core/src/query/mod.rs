//! Filter, sort and group pipeline shared by the list view and reports

mod filter;
mod group;
mod sort;

pub use filter::{filter_projects, parse_area, ProjectFilter};
pub use group::{group_projects, GroupBy, ProjectGroup, ALL_PROJECTS_GROUP};
pub use sort::{sort_projects, SortKey, SortOrder};

use serde::{Deserialize, Serialize};

use crate::models::Project;

/// A complete view over a project collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectQuery {
    #[serde(flatten)]
    pub filter: ProjectFilter,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub group_by: GroupBy,
}

impl ProjectQuery {
    /// Filtered and sorted, without grouping
    pub fn select<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let mut selected = filter_projects(projects, &self.filter);
        sort_projects(&mut selected, self.sort_by, self.sort_order);
        selected
    }

    pub fn run<'a>(&self, projects: &'a [Project]) -> Vec<ProjectGroup<'a>> {
        group_projects(self.select(projects), self.group_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::District;
    use crate::storage::seed_projects;

    #[test]
    fn test_kannur_by_name() {
        let mut projects = seed_projects();
        projects[0].district = District::Kannur;
        projects[0].lac = "Kannur (LAC No. 11)".into();
        projects[5].district = District::Kannur;
        projects[5].lac = "Payyannur (LAC No. 6)".into();

        let query = ProjectQuery {
            filter: ProjectFilter {
                district: Some(District::Kannur),
                ..ProjectFilter::default()
            },
            sort_by: SortKey::Name,
            sort_order: SortOrder::Asc,
            group_by: GroupBy::None,
        };

        let groups = query.run(&projects);
        assert_eq!(groups.len(), 1);
        let names: Vec<_> = groups[0].projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "District Hospital Extension",
                "Panchayat Office Building",
                "School Building Construction",
            ]
        );
    }

    #[test]
    fn test_nothing_matches() {
        let projects = seed_projects();
        let query = ProjectQuery {
            filter: ProjectFilter {
                lac: Some("Beypore (LAC No. 29)".into()),
                ..ProjectFilter::default()
            },
            ..ProjectQuery::default()
        };
        assert!(query.select(&projects).is_empty());
        assert!(query.run(&projects).is_empty());
    }

    #[test]
    fn test_query_from_form_json() {
        let json = r#"{"district":"","designStatus":"","sortBy":"asDate","sortOrder":"desc","groupBy":"district"}"#;
        let query: ProjectQuery = serde_json::from_str(json).unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.sort_by, SortKey::AsDate);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.group_by, GroupBy::District);
    }
}
