//! Projtrack Core Library
//!
//! Project records, local persistence, the filter/sort/group engine and the
//! report pipeline for the Projects Tracker.

pub mod dashboard;
pub mod error;
pub mod invariants;
pub mod models;
pub mod query;
pub mod report;
pub mod repository;
pub mod storage;

pub use dashboard::{active_status_counts, status_counts, ChartPayload, StatusCount};
pub use error::{Error, Result};
pub use models::*;
pub use query::{GroupBy, ProjectFilter, ProjectQuery, SortKey, SortOrder};
pub use report::{
    build_report, render_html, Column, FontSize, PageSize, PageStyle, RenderMode, Report,
    ReportConfig,
};
pub use repository::ProjectRepository;
pub use storage::{Database, ProjectStore};
