//! Calendar date helpers
//!
//! Milestone and history dates are stored as `YYYY-MM-DD`; an empty string
//! means the date is unset.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Storage format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used in reports and listings
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Parse a stored date, accepting a bare date or a full RFC3339 timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Format a date as DD-MM-YYYY
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDate>` using the empty string for `None`
///
/// An unreadable date reads as `None` so one bad value never rejects a record.
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    use super::{parse_date, DATE_FORMAT};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let date = raw.as_deref().and_then(|s| {
            let parsed = parse_date(s);
            if parsed.is_none() && !s.trim().is_empty() {
                warn!(value = s, "Unreadable date, treating as unset");
            }
            parsed
        });
        Ok(date)
    }
}

/// Deserialize an RFC3339 timestamp, falling back to now when unreadable
pub fn timestamp_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let parsed = raw
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc));
    Ok(parsed.unwrap_or_else(|| {
        warn!(value = ?raw, "Unreadable timestamp, using now");
        Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(parse_date("2024-03-10"), Some(expected));
        assert_eq!(parse_date("2024-03-10T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("10/03/2024"), None);
    }

    #[derive(serde::Deserialize)]
    struct Milestone {
        #[serde(with = "optional_date")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn test_unreadable_date_reads_as_unset() {
        let m: Milestone = serde_json::from_str(r#"{"date":"15/01/2024"}"#).unwrap();
        assert_eq!(m.date, None);
        let m: Milestone = serde_json::from_str(r#"{"date":null}"#).unwrap();
        assert_eq!(m.date, None);
        let m: Milestone = serde_json::from_str(r#"{"date":"2024-01-15"}"#).unwrap();
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[derive(serde::Deserialize)]
    struct Stamped {
        #[serde(default = "Utc::now", deserialize_with = "timestamp_or_now")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_unreadable_timestamp_becomes_now() {
        let before = Utc::now();
        let s: Stamped = serde_json::from_str(r#"{"at":"last tuesday"}"#).unwrap();
        assert!(s.at >= before);
        let s: Stamped = serde_json::from_str("{}").unwrap();
        assert!(s.at >= before);

        let s: Stamped = serde_json::from_str(r#"{"at":"2024-07-01T00:00:00.000Z"}"#).unwrap();
        assert_eq!(s.at.to_rfc3339(), "2024-07-01T00:00:00+00:00");
    }

    #[test]
    fn test_display_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(display_date(date), "05-01-2024");
    }
}
