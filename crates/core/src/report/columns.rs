//! Report column catalog

use serde::{Deserialize, Serialize};

use crate::models::dates::display_date;
use crate::models::Project;
use crate::query::SortKey;

/// Placeholder for an unset scalar
pub const EMPTY_CELL: &str = "-";

/// Sub-record a column belongs to, used for the grouped header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSection {
    Standalone,
    As,
    Ar,
}

impl ColumnSection {
    pub fn title(self) -> Option<&'static str> {
        match self {
            ColumnSection::Standalone => None,
            ColumnSection::As => Some("AS Details"),
            ColumnSection::Ar => Some("AR Details"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    ProjectName,
    District,
    Lac,
    DesignStatus,
    AsStatus,
    AsNumber,
    AsDate,
    ArStatus,
    ArNumber,
    ArDate,
    ArFloors,
    ArArea,
    AeeName,
    AeePhone,
    ContractorName,
    UpdatedAt,
    ProjectHistory,
}

/// Rendered content of one table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// One line per entry; used for the history column
    Lines(Vec<String>),
}

impl Cell {
    fn scalar(value: &str) -> Self {
        if value.trim().is_empty() {
            Cell::Text(EMPTY_CELL.to_string())
        } else {
            Cell::Text(value.to_string())
        }
    }

    fn date(date: Option<chrono::NaiveDate>) -> Self {
        Cell::Text(date.map(display_date).unwrap_or_else(|| EMPTY_CELL.to_string()))
    }

    /// Flattened text, lines joined with newlines
    pub fn text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Lines(lines) => lines.join("\n"),
        }
    }
}

impl Column {
    pub const ALL: [Column; 17] = [
        Column::ProjectName,
        Column::District,
        Column::Lac,
        Column::DesignStatus,
        Column::AsStatus,
        Column::AsNumber,
        Column::AsDate,
        Column::ArStatus,
        Column::ArNumber,
        Column::ArDate,
        Column::ArFloors,
        Column::ArArea,
        Column::AeeName,
        Column::AeePhone,
        Column::ContractorName,
        Column::UpdatedAt,
        Column::ProjectHistory,
    ];

    /// Default selection for a new report
    pub const DEFAULT_SELECTION: [Column; 6] = [
        Column::ProjectName,
        Column::District,
        Column::Lac,
        Column::DesignStatus,
        Column::AsDate,
        Column::ArDate,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Column::ProjectName => "projectName",
            Column::District => "district",
            Column::Lac => "lac",
            Column::DesignStatus => "designStatus",
            Column::AsStatus => "asStatus",
            Column::AsNumber => "asNumber",
            Column::AsDate => "asDate",
            Column::ArStatus => "arStatus",
            Column::ArNumber => "arNumber",
            Column::ArDate => "arDate",
            Column::ArFloors => "arFloors",
            Column::ArArea => "arArea",
            Column::AeeName => "aeeName",
            Column::AeePhone => "aeePhone",
            Column::ContractorName => "contractorName",
            Column::UpdatedAt => "updatedAt",
            Column::ProjectHistory => "projectHistory",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::ProjectName => "Project Name",
            Column::District => "District",
            Column::Lac => "LAC",
            Column::DesignStatus => "Design Status",
            Column::AsStatus => "AS Status",
            Column::AsNumber => "AS Number",
            Column::AsDate => "AS Date",
            Column::ArStatus => "AR Status",
            Column::ArNumber => "AR Number",
            Column::ArDate => "AR Date",
            Column::ArFloors => "No. of Floors",
            Column::ArArea => "Total Area",
            Column::AeeName => "AEE Name",
            Column::AeePhone => "AEE Phone",
            Column::ContractorName => "Contractor",
            Column::UpdatedAt => "Last Updated",
            Column::ProjectHistory => "Project History",
        }
    }

    /// Relative width in percent of the table
    pub fn width_percent(self) -> u8 {
        match self {
            Column::ProjectName => 12,
            Column::District | Column::Lac => 6,
            Column::DesignStatus | Column::AeeName => 8,
            Column::AsStatus | Column::AsNumber | Column::AsDate => 6,
            Column::ArStatus | Column::ArNumber | Column::ArDate | Column::ArArea => 6,
            Column::ArFloors => 4,
            Column::AeePhone | Column::UpdatedAt => 7,
            Column::ContractorName => 10,
            Column::ProjectHistory => 20,
        }
    }

    pub fn section(self) -> ColumnSection {
        match self {
            Column::AsStatus | Column::AsNumber | Column::AsDate => ColumnSection::As,
            Column::ArStatus
            | Column::ArNumber
            | Column::ArDate
            | Column::ArFloors
            | Column::ArArea => ColumnSection::Ar,
            _ => ColumnSection::Standalone,
        }
    }

    /// Sort key sharing this column's id, if any
    pub fn sort_key(self) -> Option<SortKey> {
        SortKey::from_id(self.id())
    }

    pub fn cell(self, project: &Project) -> Cell {
        match self {
            Column::ProjectName => Cell::scalar(&project.name),
            Column::District => Cell::scalar(project.district.name()),
            Column::Lac => Cell::scalar(&project.lac),
            Column::DesignStatus => Cell::Text(project.design_status.code()),
            Column::AsStatus => Cell::scalar(&project.as_details.status),
            Column::AsNumber => Cell::scalar(&project.as_details.number),
            Column::AsDate => Cell::date(project.as_details.date),
            Column::ArStatus => Cell::scalar(&project.ar_details.status),
            Column::ArNumber => Cell::scalar(&project.ar_details.number),
            Column::ArDate => Cell::date(project.ar_details.date),
            Column::ArFloors => Cell::scalar(&project.ar_details.number_of_floors),
            Column::ArArea => Cell::scalar(&project.ar_details.total_area),
            Column::AeeName => Cell::scalar(&project.contacts.aee_name),
            Column::AeePhone => Cell::scalar(&project.contacts.aee_phone),
            Column::ContractorName => Cell::scalar(&project.contacts.contractor_name),
            Column::UpdatedAt => Cell::date(Some(project.updated_at.date_naive())),
            Column::ProjectHistory => Cell::Lines(
                project
                    .history
                    .iter()
                    .map(|entry| {
                        let date = entry
                            .date
                            .map(display_date)
                            .unwrap_or_else(|| EMPTY_CELL.to_string());
                        format!("{}: {}", date, entry.event)
                    })
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoryEntry;
    use crate::storage::seed_projects;
    use chrono::NaiveDate;

    #[test]
    fn test_catalog_ids_roundtrip() {
        for column in Column::ALL {
            assert_eq!(Column::from_id(column.id()), Some(column));
            let json = serde_json::to_string(&column).unwrap();
            assert_eq!(json, format!("\"{}\"", column.id()));
        }
        assert_eq!(Column::from_id("budget"), None);
    }

    #[test]
    fn test_sections() {
        let as_count = Column::ALL
            .iter()
            .filter(|c| c.section() == ColumnSection::As)
            .count();
        let ar_count = Column::ALL
            .iter()
            .filter(|c| c.section() == ColumnSection::Ar)
            .count();
        assert_eq!(as_count, 3);
        assert_eq!(ar_count, 5);
    }

    #[test]
    fn test_unset_values_render_dash() {
        let projects = seed_projects();
        let anganwadi = &projects[3];
        assert_eq!(Column::AsNumber.cell(anganwadi), Cell::Text("-".into()));
        assert_eq!(Column::AsDate.cell(anganwadi), Cell::Text("-".into()));
        assert_eq!(Column::ContractorName.cell(anganwadi), Cell::Text("-".into()));
        assert_eq!(Column::ArArea.cell(anganwadi), Cell::Text("200 sq.m".into()));
    }

    #[test]
    fn test_dates_and_status_rendering() {
        let projects = seed_projects();
        let hospital = &projects[0];
        assert_eq!(Column::AsDate.cell(hospital), Cell::Text("15-01-2024".into()));
        assert_eq!(Column::UpdatedAt.cell(hospital), Cell::Text("20-12-2024".into()));
        assert_eq!(
            Column::DesignStatus.cell(hospital),
            Cell::Text("04 Detailed Design Ongoing".into())
        );
    }

    #[test]
    fn test_history_renders_lines() {
        let mut project = seed_projects().remove(0);
        project.history = vec![
            HistoryEntry::new("Site visit", NaiveDate::from_ymd_opt(2024, 2, 3)),
            HistoryEntry::new("Drawings revised", None),
        ];
        let cell = Column::ProjectHistory.cell(&project);
        assert_eq!(
            cell,
            Cell::Lines(vec![
                "03-02-2024: Site visit".into(),
                "-: Drawings revised".into(),
            ])
        );
        assert_eq!(cell.text(), "03-02-2024: Site visit\n-: Drawings revised");
    }

    #[test]
    fn test_sort_key_mapping() {
        assert_eq!(Column::AsDate.sort_key(), Some(SortKey::AsDate));
        assert_eq!(Column::ContractorName.sort_key(), None);
    }
}
