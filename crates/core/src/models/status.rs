//! Design status lifecycle
//!
//! Nine fixed states. Ordering comes from an explicit ordinal, never from the
//! text of the label.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a project's design work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStatus {
    #[serde(alias = "01 Tentative Design Ongoing")]
    TentativeOngoing,
    #[serde(alias = "02 Tentative Design On Hold")]
    TentativeOnHold,
    #[serde(alias = "03 Tentative Design Issued")]
    TentativeIssued,
    #[serde(alias = "04 Detailed Design Ongoing")]
    DetailedOngoing,
    #[serde(alias = "05 Detailed Design On Hold")]
    DetailedOnHold,
    #[serde(alias = "06 Detailed Design Issued")]
    DetailedIssued,
    #[serde(alias = "07 File Not Yet Opened")]
    FileNotOpened,
    #[serde(alias = "08 Discarded Work")]
    Discarded,
    #[serde(alias = "09 Returned to Site")]
    ReturnedToSite,
}

impl DesignStatus {
    /// All statuses in canonical order
    pub const ALL: [DesignStatus; 9] = [
        DesignStatus::TentativeOngoing,
        DesignStatus::TentativeOnHold,
        DesignStatus::TentativeIssued,
        DesignStatus::DetailedOngoing,
        DesignStatus::DetailedOnHold,
        DesignStatus::DetailedIssued,
        DesignStatus::FileNotOpened,
        DesignStatus::Discarded,
        DesignStatus::ReturnedToSite,
    ];

    /// Position in the canonical order, starting at 1
    pub fn ordinal(self) -> u8 {
        match self {
            DesignStatus::TentativeOngoing => 1,
            DesignStatus::TentativeOnHold => 2,
            DesignStatus::TentativeIssued => 3,
            DesignStatus::DetailedOngoing => 4,
            DesignStatus::DetailedOnHold => 5,
            DesignStatus::DetailedIssued => 6,
            DesignStatus::FileNotOpened => 7,
            DesignStatus::Discarded => 8,
            DesignStatus::ReturnedToSite => 9,
        }
    }

    /// Human readable label without the numeric prefix
    pub fn label(self) -> &'static str {
        match self {
            DesignStatus::TentativeOngoing => "Tentative Design Ongoing",
            DesignStatus::TentativeOnHold => "Tentative Design On Hold",
            DesignStatus::TentativeIssued => "Tentative Design Issued",
            DesignStatus::DetailedOngoing => "Detailed Design Ongoing",
            DesignStatus::DetailedOnHold => "Detailed Design On Hold",
            DesignStatus::DetailedIssued => "Detailed Design Issued",
            DesignStatus::FileNotOpened => "File Not Yet Opened",
            DesignStatus::Discarded => "Discarded Work",
            DesignStatus::ReturnedToSite => "Returned to Site",
        }
    }

    /// Label with the two-digit ordinal prefix, e.g. "01 Tentative Design Ongoing"
    pub fn code(self) -> String {
        format!("{:02} {}", self.ordinal(), self.label())
    }

    /// Short form used on dashboard cards
    pub fn abbreviation(self) -> &'static str {
        match self {
            DesignStatus::TentativeOngoing => "TD Ongoing",
            DesignStatus::TentativeOnHold => "TD On Hold",
            DesignStatus::TentativeIssued => "TD Issued",
            DesignStatus::DetailedOngoing => "DD Ongoing",
            DesignStatus::DetailedOnHold => "DD On Hold",
            DesignStatus::DetailedIssued => "DD Issued",
            DesignStatus::FileNotOpened => "Not Opened",
            DesignStatus::Discarded => "Discarded",
            DesignStatus::ReturnedToSite => "Returned",
        }
    }

    /// Display color (hex)
    pub fn color(self) -> &'static str {
        match self {
            DesignStatus::TentativeOngoing => "#3b82f6",
            DesignStatus::TentativeOnHold => "#f59e0b",
            DesignStatus::TentativeIssued => "#10b981",
            DesignStatus::DetailedOngoing => "#8b5cf6",
            DesignStatus::DetailedOnHold => "#ef4444",
            DesignStatus::DetailedIssued => "#06b6d4",
            DesignStatus::FileNotOpened => "#6b7280",
            DesignStatus::Discarded => "#dc2626",
            DesignStatus::ReturnedToSite => "#ec4899",
        }
    }

    /// Parse from the serialized token, the prefixed code, the bare label or the ordinal
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Self::ALL.into_iter().find(|st| st.ordinal() == n);
        }
        Self::ALL.into_iter().find(|st| {
            st.token() == s || st.code() == s || st.label().eq_ignore_ascii_case(s)
        })
    }

    /// Serialized token (snake_case)
    pub fn token(self) -> &'static str {
        match self {
            DesignStatus::TentativeOngoing => "tentative_ongoing",
            DesignStatus::TentativeOnHold => "tentative_on_hold",
            DesignStatus::TentativeIssued => "tentative_issued",
            DesignStatus::DetailedOngoing => "detailed_ongoing",
            DesignStatus::DetailedOnHold => "detailed_on_hold",
            DesignStatus::DetailedIssued => "detailed_issued",
            DesignStatus::FileNotOpened => "file_not_opened",
            DesignStatus::Discarded => "discarded",
            DesignStatus::ReturnedToSite => "returned_to_site",
        }
    }
}

impl Default for DesignStatus {
    fn default() -> Self {
        DesignStatus::FileNotOpened
    }
}

impl PartialOrd for DesignStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DesignStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl std::fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for DesignStatus {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        Self::parse(s)
            .ok_or_else(|| crate::error::Error::Validation(format!("Unknown design status '{}'", s)))
    }
}
