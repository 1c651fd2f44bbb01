//! Project model - the tracked unit of work

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates::{self, optional_date};
use super::{DesignStatus, District};

/// Unique project identifier
///
/// Fresh ids are UUID v4 strings; ids coming from storage or the remote
/// collection are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Administrative sanction milestone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AsDetails {
    pub status: String,
    pub number: String,
    #[serde(with = "optional_date")]
    pub date: Option<NaiveDate>,
}

/// Architectural review milestone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArDetails {
    pub status: String,
    pub number: String,
    #[serde(with = "optional_date")]
    pub date: Option<NaiveDate>,
    pub revision_details: String,
    pub number_of_floors: String,
    /// Free text, may carry units ("15000 sq.m")
    pub total_area: String,
}

/// People attached to a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contacts {
    pub ae_name: String,
    pub ae_phone: String,
    pub aee_name: String,
    pub aee_phone: String,
    pub contractor_name: String,
    pub contractor_phone: String,
}

/// One user-entered line of a project's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default = "new_history_id")]
    pub id: String,
    #[serde(default)]
    pub event: String,
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
}

fn new_history_id() -> String {
    Uuid::new_v4().to_string()
}

impl HistoryEntry {
    pub fn new(event: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: new_history_id(),
            event: event.into(),
            date,
        }
    }

    /// Neither an event text nor a date
    pub fn is_blank(&self) -> bool {
        self.event.trim().is_empty() && self.date.is_none()
    }
}

/// Drop rows the user left empty before saving a history edit
pub fn clean_history(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    entries.into_iter().filter(|e| !e.is_blank()).collect()
}

/// A tracked construction/design project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "projectName")]
    pub name: String,
    pub district: District,
    /// Empty when cleared after a district change
    #[serde(default)]
    pub lac: String,
    #[serde(default)]
    pub as_details: AsDetails,
    #[serde(default)]
    pub sr_details: String,
    #[serde(default)]
    pub ar_details: ArDetails,
    #[serde(default)]
    pub contacts: Contacts,
    pub design_status: DesignStatus,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default = "Utc::now", deserialize_with = "dates::timestamp_or_now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "dates::timestamp_or_now")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Refresh `updated_at`, always moving it forward
    pub fn touch(&mut self) {
        let now = Utc::now();
        let floor = self.updated_at + Duration::milliseconds(1);
        self.updated_at = now.max(floor);
    }

    /// Change district, clearing a LAC that does not belong to it
    pub fn set_district(&mut self, district: District) {
        self.district = district;
        if !self.lac.is_empty() && !district.contains_lac(&self.lac) {
            self.lac.clear();
        }
    }
}
