//! Editable project data
//!
//! A `ProjectDraft` is what a form collects before a project exists; a
//! `ProjectPatch` carries a partial edit of an existing project.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

use super::{
    ArDetails, AsDetails, Contacts, DesignStatus, District, HistoryEntry, Project, ProjectId,
};

/// All user-editable fields of a project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub district: Option<District>,
    pub lac: String,
    pub as_details: AsDetails,
    pub sr_details: String,
    pub ar_details: ArDetails,
    pub contacts: Contacts,
    pub design_status: DesignStatus,
    pub history: Vec<HistoryEntry>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            district: None,
            lac: String::new(),
            as_details: AsDetails::default(),
            sr_details: String::new(),
            ar_details: ArDetails::default(),
            contacts: Contacts::default(),
            design_status: DesignStatus::FileNotOpened,
            history: Vec::new(),
        }
    }
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>, district: District) -> Self {
        Self {
            name: name.into(),
            district: Some(district),
            ..Self::default()
        }
    }

    /// Copy the editable fields of an existing project (edit or duplicate)
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            district: Some(project.district),
            lac: project.lac.clone(),
            as_details: project.as_details.clone(),
            sr_details: project.sr_details.clone(),
            ar_details: project.ar_details.clone(),
            contacts: project.contacts.clone(),
            design_status: project.design_status,
            history: project.history.clone(),
        }
    }

    /// Select a district, dropping a LAC that belongs elsewhere
    pub fn set_district(&mut self, district: District) {
        self.district = Some(district);
        if !district.contains_lac(&self.lac) {
            self.lac.clear();
        }
    }

    /// Check required fields and the district/LAC pairing
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Project name is required".into()));
        }
        let district = self
            .district
            .ok_or_else(|| Error::Validation("District is required".into()))?;
        if self.lac.trim().is_empty() {
            return Err(Error::Validation("LAC is required".into()));
        }
        if !district.contains_lac(&self.lac) {
            return Err(Error::Validation(format!(
                "LAC '{}' does not belong to {}",
                self.lac, district
            )));
        }
        Ok(())
    }

    /// Build a project with the given identity and timestamp
    ///
    /// A draft without a district falls back to the first catalog district;
    /// callers validate first.
    pub fn into_project(self, id: ProjectId, now: DateTime<Utc>) -> Project {
        Project {
            id,
            name: self.name,
            district: self.district.unwrap_or(District::ALL[0]),
            lac: self.lac,
            as_details: self.as_details,
            sr_details: self.sr_details,
            ar_details: self.ar_details,
            contacts: self.contacts,
            design_status: self.design_status,
            history: self.history,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a project; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub district: Option<District>,
    pub lac: Option<String>,
    pub as_details: Option<AsDetails>,
    pub sr_details: Option<String>,
    pub ar_details: Option<ArDetails>,
    pub contacts: Option<Contacts>,
    pub design_status: Option<DesignStatus>,
    pub history: Option<Vec<HistoryEntry>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Full replacement of every editable field
    pub fn from_draft(draft: ProjectDraft) -> Self {
        Self {
            name: Some(draft.name),
            district: draft.district,
            lac: Some(draft.lac),
            as_details: Some(draft.as_details),
            sr_details: Some(draft.sr_details),
            ar_details: Some(draft.ar_details),
            contacts: Some(draft.contacts),
            design_status: Some(draft.design_status),
            history: Some(draft.history),
        }
    }

    /// Merge into a project without touching identity or timestamps
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(district) = self.district {
            project.set_district(district);
        }
        if let Some(lac) = self.lac {
            project.lac = lac;
        }
        if let Some(as_details) = self.as_details {
            project.as_details = as_details;
        }
        if let Some(sr_details) = self.sr_details {
            project.sr_details = sr_details;
        }
        if let Some(ar_details) = self.ar_details {
            project.ar_details = ar_details;
        }
        if let Some(contacts) = self.contacts {
            project.contacts = contacts;
        }
        if let Some(status) = self.design_status {
            project.design_status = status;
        }
        if let Some(history) = self.history {
            project.history = history;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name() {
        let mut draft = ProjectDraft::new("   ", District::Kannur);
        draft.lac = "Kannur (LAC No. 11)".into();
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_requires_district_and_lac() {
        let draft = ProjectDraft {
            name: "School".into(),
            ..ProjectDraft::default()
        };
        assert!(draft.validate().is_err());

        let draft = ProjectDraft::new("School", District::Kasaragod);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_foreign_lac() {
        let mut draft = ProjectDraft::new("School", District::Kasaragod);
        draft.lac = "Kalpetta (LAC No. 19)".into();
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("does not belong"));
    }

    #[test]
    fn test_set_district_clears_foreign_lac() {
        let mut draft = ProjectDraft::new("Office", District::Kannur);
        draft.lac = "Payyannur (LAC No. 6)".into();
        draft.set_district(District::Wayanad);
        assert!(draft.lac.is_empty());
        assert_eq!(draft.district, Some(District::Wayanad));
    }

    #[test]
    fn test_default_status_is_file_not_opened() {
        assert_eq!(
            ProjectDraft::default().design_status,
            DesignStatus::FileNotOpened
        );
    }

    #[test]
    fn test_patch_district_then_lac() {
        let mut draft = ProjectDraft::new("Office", District::Kannur);
        draft.lac = "Payyannur (LAC No. 6)".into();
        let mut project = draft.into_project(ProjectId::generate(), Utc::now());

        ProjectPatch {
            district: Some(District::Wayanad),
            ..ProjectPatch::default()
        }
        .apply_to(&mut project);
        assert!(project.lac.is_empty());

        ProjectPatch {
            lac: Some("Kalpetta (LAC No. 19)".into()),
            ..ProjectPatch::default()
        }
        .apply_to(&mut project);
        assert_eq!(project.lac, "Kalpetta (LAC No. 19)");
    }

    #[test]
    fn test_draft_roundtrip_through_project() {
        let mut draft = ProjectDraft::new("Hospital", District::Kozhikode);
        draft.lac = "Beypore (LAC No. 29)".into();
        draft.design_status = DesignStatus::DetailedIssued;
        let project = draft.clone().into_project(ProjectId::generate(), Utc::now());
        assert_eq!(ProjectDraft::from_project(&project), draft);
    }
}
