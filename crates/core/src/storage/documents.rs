//! Mapping between projects and remote collection documents
//!
//! A document is keyed by the project id. When reading back, the document
//! key wins over any id stored in the body, and missing or unreadable
//! timestamps become "now".

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::models::Project;

/// Body of a remote document
pub type DocumentFields = Map<String, Value>;

/// Split a project into its document key and a body without `id`
pub fn project_to_document(project: &Project) -> Result<(String, DocumentFields)> {
    match serde_json::to_value(project)? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok((project.id.to_string(), fields))
        }
        _ => Err(Error::InvalidOperation(format!(
            "Project {} did not serialize to an object",
            project.id
        ))),
    }
}

fn timestamp_or_now(value: Option<&Value>, now: DateTime<Utc>) -> Value {
    let parsed = value
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));
    Value::String(parsed.unwrap_or(now).to_rfc3339())
}

/// Rebuild a project from a remote document
pub fn project_from_document(id: &str, mut fields: DocumentFields) -> Result<Project> {
    let now = Utc::now();
    fields.insert("id".into(), Value::String(id.to_string()));
    for key in ["createdAt", "updatedAt"] {
        let stamp = timestamp_or_now(fields.get(key), now);
        fields.insert(key.into(), stamp);
    }
    Ok(serde_json::from_value(Value::Object(fields))?)
}
