//! Project filtering
//!
//! Every supplied predicate must hold; unsupplied predicates always pass.
//! Form-style input where the empty string means "not applied" is accepted
//! when deserializing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DesignStatus, District, Project};

/// Declarative filter over a project collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFilter {
    #[serde(
        deserialize_with = "lenient::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub design_status: Option<DesignStatus>,
    #[serde(
        deserialize_with = "lenient::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub district: Option<District>,
    #[serde(
        deserialize_with = "lenient::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub lac: Option<String>,
    #[serde(
        deserialize_with = "lenient::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub as_date_from: Option<NaiveDate>,
    #[serde(
        deserialize_with = "lenient::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub as_date_to: Option<NaiveDate>,
    #[serde(
        rename = "arAreaMin",
        deserialize_with = "lenient::area_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub area_min: Option<f64>,
    #[serde(
        rename = "arAreaMax",
        deserialize_with = "lenient::area_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub area_max: Option<f64>,
}

impl ProjectFilter {
    /// No predicate supplied
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Select a district filter; the LAC filter is reset
    pub fn set_district(&mut self, district: Option<District>) {
        self.district = district;
        self.lac = None;
    }

    pub fn matches(&self, project: &Project) -> bool {
        if self
            .design_status
            .is_some_and(|status| project.design_status != status)
        {
            return false;
        }
        if self.district.is_some_and(|d| project.district != d) {
            return false;
        }
        if self.lac.as_deref().is_some_and(|lac| project.lac != lac) {
            return false;
        }

        // Projects without an AS date are never excluded by the date range
        if let Some(date) = project.as_details.date {
            if self.as_date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.as_date_to.is_some_and(|to| date > to) {
                return false;
            }
        }

        // Same for an empty or unparsable area
        if let Some(area) = parse_area(&project.ar_details.total_area) {
            if self.area_min.is_some_and(|min| area < min) {
                return false;
            }
            if self.area_max.is_some_and(|max| area > max) {
                return false;
            }
        }

        true
    }
}

/// Retain the projects that satisfy every predicate, keeping input order
pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// Read a number out of free-text area such as "15000 sq.m"
///
/// Everything except digits and decimal points is stripped, then the
/// longest numeric prefix is parsed. Units are ignored: "800 sq.m" and
/// "800 sq ft" compare equal.
pub fn parse_area(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_point = false;
    let mut seen_digit = false;
    for (i, c) in stripped.char_indices() {
        match c {
            '.' if !seen_point => seen_point = true,
            '.' => break,
            _ => seen_digit = true,
        }
        end = i + 1;
    }

    if !seen_digit {
        return None;
    }
    stripped[..end].trim_end_matches('.').parse().ok()
}

mod lenient {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    /// Treat a missing value or blank string as "not applied"
    pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(D::Error::custom),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bound {
        Number(f64),
        Text(String),
    }

    /// Area bounds may arrive as numbers or as form text
    pub fn area_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Bound>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Bound::Number(n)) => Ok(Some(n)),
            Some(Bound::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Bound::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid area bound '{}'", s))),
        }
    }
}
