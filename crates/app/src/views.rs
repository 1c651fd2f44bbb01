//! Plain-text rendering for terminal output

use std::fmt::Write;
use std::path::Path;

use projtrack_core::dates::display_date;
use projtrack_core::query::ProjectGroup;
use projtrack_core::storage::SlotInfo;
use projtrack_core::{active_status_counts, ChartPayload, Project, StatusCount};

use crate::cloud::{StatusKind, StatusMessage};

const SHORT_ID_LEN: usize = 8;

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

pub fn short_id(project: &Project) -> &str {
    let id = project.id.as_str();
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn project_line(project: &Project) -> String {
    format!(
        "{:<8}  {:<32}  {:<10}  {:<34}  {}",
        short_id(project),
        project.name,
        project.district.name(),
        or_dash(&project.lac),
        project.design_status.code()
    )
}

/// Grouped listing; group headers are shown only when grouping is on
pub fn list_view(groups: &[ProjectGroup<'_>], grouped: bool) -> String {
    if groups.is_empty() {
        return "No projects found\n".to_string();
    }

    let mut out = String::new();
    for group in groups {
        if grouped {
            let _ = writeln!(out, "\n== {} ==", group.heading());
        }
        for project in &group.projects {
            let _ = writeln!(out, "{}", project_line(project));
        }
    }
    out
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<18} {}", label, or_dash(value));
}

fn date_text(date: Option<chrono::NaiveDate>) -> String {
    date.map(display_date).unwrap_or_default()
}

pub fn project_detail(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", project.name);
    let _ = writeln!(out, "  {:<18} {}", "Id", project.id);
    field(&mut out, "District", project.district.name());
    field(&mut out, "LAC", &project.lac);
    field(&mut out, "Design Status", &project.design_status.code());

    let _ = writeln!(out, "AS Details");
    field(&mut out, "Status", &project.as_details.status);
    field(&mut out, "Number", &project.as_details.number);
    field(&mut out, "Date", &date_text(project.as_details.date));

    let _ = writeln!(out, "SR Details");
    field(&mut out, "Details", &project.sr_details);

    let ar = &project.ar_details;
    let _ = writeln!(out, "AR Details");
    field(&mut out, "Status", &ar.status);
    field(&mut out, "Number", &ar.number);
    field(&mut out, "Date", &date_text(ar.date));
    field(&mut out, "Revision", &ar.revision_details);
    field(&mut out, "No. of Floors", &ar.number_of_floors);
    field(&mut out, "Total Area", &ar.total_area);

    let c = &project.contacts;
    let _ = writeln!(out, "Contacts");
    field(&mut out, "AE", &c.ae_name);
    field(&mut out, "AE Phone", &c.ae_phone);
    field(&mut out, "AEE", &c.aee_name);
    field(&mut out, "AEE Phone", &c.aee_phone);
    field(&mut out, "Contractor", &c.contractor_name);
    field(&mut out, "Contractor Phone", &c.contractor_phone);

    let _ = writeln!(
        out,
        "Created {} / Updated {}",
        project.created_at.format("%d-%m-%Y %H:%M"),
        project.updated_at.format("%d-%m-%Y %H:%M")
    );
    out
}

pub fn history_view(project: &Project) -> String {
    let mut out = format!("History of {}\n", project.name);
    if project.history.is_empty() {
        out.push_str("  (no entries)\n");
        return out;
    }
    for entry in &project.history {
        let date = entry.date.map(display_date).unwrap_or_else(|| "-".into());
        let id = entry.id.get(..SHORT_ID_LEN).unwrap_or(&entry.id);
        let _ = writeln!(out, "  {:<8}  {}  {}", id, date, entry.event);
    }
    out
}

/// Status overview: total plus one line per status that has projects
pub fn dashboard_view(projects: &[Project]) -> String {
    let mut out = String::from("Design Status Overview\n");
    let total = ChartPayload::Total {
        count: projects.len(),
    };
    let _ = writeln!(out, "  {:<28} {}", total.title(), total.tooltip());

    for bar in active_status_counts(projects) {
        let payload = ChartPayload::StatusBar(bar);
        let _ = writeln!(
            out,
            "  {:<28} {:<12} {}",
            payload.title(),
            payload.tooltip(),
            bar_graph(&bar)
        );
    }
    out
}

fn bar_graph(bar: &StatusCount) -> String {
    format!("{} ({})", "#".repeat(bar.count), bar.short_label())
}

pub fn status_banner(status: &StatusMessage) -> String {
    let tag = match status.kind {
        StatusKind::Success => "ok",
        StatusKind::Error => "error",
    };
    format!("[sync {}] {}\n\n", tag, status.text)
}

/// Inputs of the `status` overview
pub struct Overview<'a> {
    pub projects: usize,
    pub data_dir: &'a Path,
    pub schema_version: u32,
    pub local: Option<&'a SlotInfo>,
    pub remote: Option<&'a str>,
    pub last_sync: Option<&'a StatusMessage>,
}

pub fn status_view(overview: &Overview<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:<12} {}", "Projects", overview.projects);
    let _ = writeln!(out, "  {:<12} {}", "Data dir", overview.data_dir.display());

    let local = match overview.local {
        Some(info) => format!(
            "{} bytes, saved {} (schema v{})",
            info.size_bytes,
            info.updated_at.format("%d-%m-%Y %H:%M:%S"),
            overview.schema_version
        ),
        None => "not saved yet".to_string(),
    };
    let _ = writeln!(out, "  {:<12} {}", "Local data", local);
    let _ = writeln!(
        out,
        "  {:<12} {}",
        "Remote",
        overview.remote.unwrap_or("not configured")
    );

    if let Some(status) = overview.last_sync {
        let _ = writeln!(out, "  {:<12} {}", "Last sync", status.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use projtrack_core::query::{group_projects, GroupBy};
    use projtrack_core::storage::seed_projects;
    use projtrack_core::HistoryEntry;

    #[test]
    fn test_list_view_grouped() {
        let projects = seed_projects();
        let groups = group_projects(projects.iter().collect(), GroupBy::District);
        let text = list_view(&groups, true);
        assert!(text.contains("== Kozhikode (1) =="));
        assert!(text.contains("Panchayat Office Building"));
        assert_eq!(text.lines().filter(|l| l.starts_with("==")).count(), 6);
    }

    #[test]
    fn test_list_view_empty() {
        assert_eq!(list_view(&[], false), "No projects found\n");
    }

    #[test]
    fn test_detail_shows_dashes_for_blank_fields() {
        let projects = seed_projects();
        let text = project_detail(&projects[3]);
        assert!(text.starts_with("Anganwadi Center\n"));
        assert!(text.contains("  Number             -\n"));
        assert!(text.contains("07 File Not Yet Opened"));
    }

    #[test]
    fn test_history_view() {
        let mut project = seed_projects().remove(0);
        assert!(history_view(&project).contains("(no entries)"));

        project.history = vec![HistoryEntry::new(
            "Estimate sent",
            chrono::NaiveDate::from_ymd_opt(2024, 4, 1),
        )];
        let text = history_view(&project);
        assert!(text.contains("01-04-2024  Estimate sent"));
    }

    #[test]
    fn test_dashboard_view() {
        let projects = seed_projects();
        let text = dashboard_view(&projects);
        assert!(text.contains("Total"));
        assert!(text.contains("6 projects"));
        assert!(text.contains("04 Detailed Design Ongoing"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_status_view() {
        let info = SlotInfo {
            key: "projects-tracker-data".into(),
            size_bytes: 2048,
            updated_at: chrono::DateTime::parse_from_rfc3339("2024-06-01T09:30:00Z")
                .unwrap()
                .with_timezone(&chrono::Utc),
        };
        let last = StatusMessage::success("Successfully uploaded 6 project(s) to cloud");

        let dir = Path::new("/var/lib/projtrack");
        let text = status_view(&Overview {
            projects: 6,
            data_dir: dir,
            schema_version: 2,
            local: Some(&info),
            remote: None,
            last_sync: Some(&last),
        });
        assert!(text.contains("  Projects     6\n"));
        assert!(text.contains("  Data dir     /var/lib/projtrack\n"));
        assert!(text.contains("2048 bytes, saved 01-06-2024 09:30:00 (schema v2)"));
        assert!(text.contains("  Remote       not configured\n"));
        assert!(text.contains("Last sync    Successfully uploaded 6"));

        let bare = status_view(&Overview {
            projects: 0,
            data_dir: dir,
            schema_version: 2,
            local: None,
            remote: Some("projtrack://10.0.0.2:7341/projects (unreachable)"),
            last_sync: None,
        });
        assert!(bare.contains("not saved yet"));
        assert!(bare.contains("(unreachable)"));
        assert!(!bare.contains("Last sync"));

        assert_eq!(
            status_banner(&StatusMessage::error("Failed")),
            "[sync error] Failed\n\n"
        );
    }
}
