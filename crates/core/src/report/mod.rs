//! Report pipeline
//!
//! Runs the shared filter/sort/group query, projects the selected columns
//! into display cells and lays out headers and page geometry. Both HTML
//! renderings consume the same [`Report`].

mod columns;
mod config;
mod html;
mod layout;

pub use columns::{Cell, Column, ColumnSection, EMPTY_CELL};
pub use config::{FontSize, PageSize, PageStyle, ReportConfig};
pub use html::{render_html, RenderMode};
pub use layout::{
    header_layout, HeaderCell, HeaderLayout, PageGeometry, PAGE_MARGIN_MM, SERIAL_WIDTH_PERCENT,
};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::dates::display_date;
use crate::models::{DesignStatus, District, Project};
use crate::query::GroupBy;

/// Shown instead of the table body when nothing matches
pub const NO_MATCHES: &str = "No projects match the selected filters.";

pub const REPORT_TITLE: &str = "Projects Report";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// 1-based, restarts in every group section
    pub serial: usize,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    /// Group header text; `None` when grouping is off
    pub heading: Option<String>,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub generated_at: DateTime<Utc>,
    pub total_projects: usize,
    pub status_filter: Option<DesignStatus>,
    pub district_filter: Option<District>,
    pub group_by: GroupBy,
}

impl ReportMeta {
    /// Summary items shown under the report title
    pub fn summary(&self) -> Vec<String> {
        let mut items = vec![
            format!("Generated: {}", display_date(self.generated_at.date_naive())),
            format!("Total Projects: {}", self.total_projects),
        ];
        if let Some(status) = self.status_filter {
            items.push(format!("Status: {}", status.code()));
        }
        if let Some(district) = self.district_filter {
            items.push(format!("District: {}", district));
        }
        if self.group_by != GroupBy::None {
            items.push(format!("Grouped by: {}", self.group_by.label()));
        }
        items
    }

    pub fn footer(&self) -> String {
        format!(
            "Projects Tracker - Generated on {} at {}",
            display_date(self.generated_at.date_naive()),
            self.generated_at.format("%H:%M:%S")
        )
    }
}

/// Fully computed report, independent of how it is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub meta: ReportMeta,
    pub columns: Vec<Column>,
    pub header: HeaderLayout,
    pub geometry: PageGeometry,
    pub font_size: FontSize,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.meta.total_projects == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }
}

/// Build a report over `projects` as configured
pub fn build_report(
    projects: &[Project],
    config: &ReportConfig,
    generated_at: DateTime<Utc>,
) -> Report {
    let query = config.query();
    let groups = query.run(projects);
    let grouped = config.group_by != GroupBy::None;

    let sections: Vec<ReportSection> = groups
        .into_iter()
        .map(|group| ReportSection {
            heading: grouped.then(|| group.heading()),
            rows: group
                .projects
                .iter()
                .enumerate()
                .map(|(i, project)| ReportRow {
                    serial: i + 1,
                    cells: config
                        .selected_columns
                        .iter()
                        .map(|column| column.cell(project))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let total_projects = sections.iter().map(|s| s.rows.len()).sum();
    debug!(
        total_projects,
        sections = sections.len(),
        columns = config.selected_columns.len(),
        "Built report"
    );

    Report {
        meta: ReportMeta {
            generated_at,
            total_projects,
            status_filter: config.filter.design_status,
            district_filter: config.filter.district,
            group_by: config.group_by,
        },
        columns: config.selected_columns.clone(),
        header: header_layout(&config.selected_columns),
        geometry: PageGeometry::new(config.page_size, config.page_style),
        font_size: config.font_size,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_projects;
    use chrono::TimeZone;

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 5).unwrap()
    }

    #[test]
    fn test_ungrouped_report_is_continuous() {
        let projects = seed_projects();
        let report = build_report(&projects, &ReportConfig::default(), generated());

        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].heading, None);
        let serials: Vec<usize> = report.rows().map(|r| r.serial).collect();
        assert_eq!(serials, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            report.sections[0].rows[0].cells[0],
            Cell::Text("Anganwadi Center".into())
        );
        assert_eq!(report.geometry.width_mm, 297);
    }

    #[test]
    fn test_grouped_serials_restart() {
        let mut projects = seed_projects();
        projects[0].set_district(District::Kannur);
        projects[5].set_district(District::Kannur);

        let config = ReportConfig {
            group_by: GroupBy::District,
            ..ReportConfig::default()
        };
        let report = build_report(&projects, &config, generated());

        let headings: Vec<_> = report
            .sections
            .iter()
            .map(|s| s.heading.clone().unwrap())
            .collect();
        assert_eq!(
            headings,
            vec!["Wayanad (1)", "Malappuram (1)", "Kannur (3)", "Palakkad (1)"]
        );
        let kannur: Vec<usize> = report.sections[2].rows.iter().map(|r| r.serial).collect();
        assert_eq!(kannur, vec![1, 2, 3]);
        assert_eq!(report.meta.total_projects, 6);
    }

    #[test]
    fn test_empty_result() {
        let projects = seed_projects();
        let mut config = ReportConfig::default();
        config.set_district(Some(District::Kannur));
        config.filter.design_status = Some(DesignStatus::Discarded);

        let report = build_report(&projects, &config, generated());
        assert!(report.is_empty());
        assert!(report.sections.is_empty());
    }

    #[test]
    fn test_meta_summary() {
        let projects = seed_projects();
        let mut config = ReportConfig::default();
        config.filter.design_status = Some(DesignStatus::TentativeIssued);
        config.set_district(Some(District::Kannur));
        config.group_by = GroupBy::DesignStatus;

        let report = build_report(&projects, &config, generated());
        assert_eq!(
            report.meta.summary(),
            vec![
                "Generated: 02-01-2025",
                "Total Projects: 1",
                "Status: 03 Tentative Design Issued",
                "District: Kannur",
                "Grouped by: Design Status",
            ]
        );
        assert_eq!(
            report.meta.footer(),
            "Projects Tracker - Generated on 02-01-2025 at 09:30:05"
        );
    }

    #[test]
    fn test_cells_follow_selected_columns() {
        let projects = seed_projects();
        let config = ReportConfig {
            selected_columns: vec![Column::ArArea, Column::ProjectName],
            sort_by: crate::query::SortKey::UpdatedAt,
            ..ReportConfig::default()
        };
        let report = build_report(&projects, &config, generated());
        let first = &report.sections[0].rows[0];
        assert_eq!(
            first.cells,
            vec![
                Cell::Text("1200 sq.m".into()),
                Cell::Text("Police Station Renovation".into()),
            ]
        );
        assert_eq!(report.header.column_count(), 3);
    }
}
