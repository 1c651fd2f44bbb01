//! Report configuration
//!
//! Loadable from TOML or JSON using the camelCase option names of the print
//! dialog. Unknown column ids are dropped rather than rejected.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::columns::Column;
use crate::error::{Error, Result};
use crate::models::District;
use crate::query::{GroupBy, ProjectFilter, ProjectQuery, SortKey, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStyle {
    Portrait,
    #[default]
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
}

impl PageSize {
    /// Portrait (width, height) in millimetres
    pub fn portrait_mm(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (210, 297),
            PageSize::A3 => (297, 420),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn px(self) -> u8 {
        match self {
            FontSize::Small => 12,
            FontSize::Medium => 14,
            FontSize::Large => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub page_style: PageStyle,
    pub page_size: PageSize,
    pub font_size: FontSize,
    #[serde(flatten)]
    pub filter: ProjectFilter,
    pub group_by: GroupBy,
    #[serde(deserialize_with = "known_columns")]
    pub selected_columns: Vec<Column>,
    #[serde(deserialize_with = "sort_key_or_name")]
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_style: PageStyle::default(),
            page_size: PageSize::default(),
            font_size: FontSize::default(),
            filter: ProjectFilter::default(),
            group_by: GroupBy::None,
            selected_columns: Column::DEFAULT_SELECTION.to_vec(),
            sort_by: SortKey::Name,
            sort_order: SortOrder::Asc,
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.json` file, anything else is read as TOML
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ReportConfig(e.to_string()))
    }

    /// Change the district filter; the LAC filter is reset
    pub fn set_district(&mut self, district: Option<District>) {
        self.filter.set_district(district);
    }

    /// Add a column at the end, ignoring duplicates
    pub fn select_column(&mut self, column: Column) {
        if !self.selected_columns.contains(&column) {
            self.selected_columns.push(column);
        }
    }

    pub fn deselect_column(&mut self, column: Column) {
        self.selected_columns.retain(|c| *c != column);
    }

    /// The filter/sort/group part of this configuration
    pub fn query(&self) -> ProjectQuery {
        ProjectQuery {
            filter: self.filter.clone(),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            group_by: self.group_by,
        }
    }
}

fn known_columns<'de, D>(deserializer: D) -> std::result::Result<Vec<Column>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Vec<String> = Vec::deserialize(deserializer)?;
    let mut columns = Vec::with_capacity(ids.len());
    for id in ids {
        match Column::from_id(&id) {
            Some(column) if !columns.contains(&column) => columns.push(column),
            Some(_) => {}
            None => warn!(column = %id, "Dropping unknown report column"),
        }
    }
    Ok(columns)
}

fn sort_key_or_name<'de, D>(deserializer: D) -> std::result::Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    let id = String::deserialize(deserializer)?;
    let key = SortKey::from_id(&id);
    if key.is_none() {
        warn!(sort_by = %id, "Unsupported sort column, sorting by project name");
    }
    Ok(key.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DesignStatus;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.page_style, PageStyle::Landscape);
        assert_eq!(config.page_size, PageSize::A4);
        assert_eq!(config.font_size, FontSize::Small);
        assert_eq!(config.group_by, GroupBy::None);
        assert_eq!(config.sort_by, SortKey::Name);
        assert_eq!(config.sort_order, SortOrder::Asc);
        assert_eq!(config.selected_columns, Column::DEFAULT_SELECTION.to_vec());
        assert!(config.filter.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config = ReportConfig::from_toml_str(
            r#"
pageStyle = "portrait"
pageSize = "A3"
fontSize = "large"
designStatus = "06 Detailed Design Issued"
district = ""
groupBy = "district"
selectedColumns = ["projectName", "asStatus", "budget", "arArea", "asStatus"]
sortBy = "arDate"
sortOrder = "desc"
"#,
        )
        .unwrap();

        assert_eq!(config.page_style, PageStyle::Portrait);
        assert_eq!(config.page_size, PageSize::A3);
        assert_eq!(config.font_size, FontSize::Large);
        assert_eq!(config.filter.design_status, Some(DesignStatus::DetailedIssued));
        assert_eq!(config.filter.district, None);
        assert_eq!(config.group_by, GroupBy::District);
        assert_eq!(
            config.selected_columns,
            vec![Column::ProjectName, Column::AsStatus, Column::ArArea]
        );
        assert_eq!(config.sort_by, SortKey::ArDate);
        assert_eq!(config.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_parse_json_with_fallback_sort() {
        let config = ReportConfig::from_json_str(
            r#"{"sortBy": "contractorName", "asDateFrom": "2024-01-01", "lac": ""}"#,
        )
        .unwrap();
        assert_eq!(config.sort_by, SortKey::Name);
        assert!(config.filter.as_date_from.is_some());
        assert_eq!(config.filter.lac, None);
        assert_eq!(config.selected_columns.len(), 6);
    }

    #[test]
    fn test_set_district_clears_lac() {
        let mut config = ReportConfig::default();
        config.filter.lac = Some("Kannur (LAC No. 11)".into());
        config.set_district(Some(District::Wayanad));
        assert_eq!(config.filter.district, Some(District::Wayanad));
        assert_eq!(config.filter.lac, None);
    }

    #[test]
    fn test_column_selection() {
        let mut config = ReportConfig::default();
        config.select_column(Column::ProjectName);
        assert_eq!(config.selected_columns.len(), 6);
        config.select_column(Column::ProjectHistory);
        config.deselect_column(Column::Lac);
        assert_eq!(config.selected_columns.last(), Some(&Column::ProjectHistory));
        assert!(!config.selected_columns.contains(&Column::Lac));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        let mut config = ReportConfig::default();
        config.group_by = GroupBy::Lac;
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
