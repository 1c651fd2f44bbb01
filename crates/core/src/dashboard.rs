//! Design status overview
//!
//! Bar chart data and summary cards for the dashboard view.

use serde::Serialize;

use crate::models::{DesignStatus, Project};

/// Number of projects in one design status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: DesignStatus,
    pub count: usize,
}

impl StatusCount {
    /// Axis label, without the numeric prefix
    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    /// Short label for summary cards
    pub fn short_label(&self) -> &'static str {
        self.status.abbreviation()
    }

    pub fn color(&self) -> &'static str {
        self.status.color()
    }
}

/// One bar per design status, in ordinal order, including empty ones
pub fn status_counts(projects: &[Project]) -> Vec<StatusCount> {
    DesignStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: projects.iter().filter(|p| p.design_status == status).count(),
        })
        .collect()
}

/// Statuses with at least one project, for the summary cards
pub fn active_status_counts(projects: &[Project]) -> Vec<StatusCount> {
    status_counts(projects)
        .into_iter()
        .filter(|s| s.count > 0)
        .collect()
}

/// Payload carried by a hovered chart element or summary card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartPayload {
    StatusBar(StatusCount),
    Total { count: usize },
}

fn projects_text(count: usize) -> String {
    if count == 1 {
        "1 project".to_string()
    } else {
        format!("{} projects", count)
    }
}

impl ChartPayload {
    pub fn title(&self) -> String {
        match self {
            ChartPayload::StatusBar(bar) => bar.status.code(),
            ChartPayload::Total { .. } => "Total".to_string(),
        }
    }

    pub fn tooltip(&self) -> String {
        match self {
            ChartPayload::StatusBar(bar) => projects_text(bar.count),
            ChartPayload::Total { count } => projects_text(*count),
        }
    }

    /// Status a click on this element should filter the list by
    pub fn status_filter(&self) -> Option<DesignStatus> {
        match self {
            ChartPayload::StatusBar(bar) => Some(bar.status),
            ChartPayload::Total { .. } => None,
        }
    }
}
