//! Stable ordering of filtered projects

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Project;

/// Field a project list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "projectName")]
    Name,
    #[serde(rename = "district")]
    District,
    #[serde(rename = "lac")]
    Lac,
    #[serde(rename = "designStatus")]
    DesignStatus,
    #[serde(rename = "asDate")]
    AsDate,
    #[serde(rename = "arDate")]
    ArDate,
    #[serde(rename = "updatedAt")]
    UpdatedAt,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Name,
        SortKey::District,
        SortKey::Lac,
        SortKey::DesignStatus,
        SortKey::AsDate,
        SortKey::ArDate,
        SortKey::UpdatedAt,
    ];

    /// Column identifier this key shares with the report catalog
    pub fn id(self) -> &'static str {
        match self {
            SortKey::Name => "projectName",
            SortKey::District => "district",
            SortKey::Lac => "lac",
            SortKey::DesignStatus => "designStatus",
            SortKey::AsDate => "asDate",
            SortKey::ArDate => "arDate",
            SortKey::UpdatedAt => "updatedAt",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Unknown identifiers fall back to the project name
    pub fn from_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// Compare two projects on this key alone
    pub fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::District => a.district.name().cmp(b.district.name()),
            SortKey::Lac => a.lac.cmp(&b.lac),
            SortKey::DesignStatus => a.design_status.cmp(&b.design_status),
            // Missing dates sort before any real date
            SortKey::AsDate => a.as_details.date.cmp(&b.as_details.date),
            SortKey::ArDate => a.ar_details.date.cmp(&b.ar_details.date),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Sort in place; ties keep their input order in either direction
pub fn sort_projects(projects: &mut [&Project], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => projects.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Desc => projects.sort_by(|a, b| key.compare(b, a)),
    }
}
