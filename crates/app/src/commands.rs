//! Command-line interface

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use projtrack_core::dates::parse_date;
use projtrack_core::storage::{ProjectStore, PROJECTS_SLOT};
use projtrack_core::{
    build_report, clean_history, render_html, Column, DesignStatus, District, GroupBy,
    HistoryEntry, ProjectDraft, ProjectFilter, ProjectPatch, ProjectQuery, ProjectRepository,
    RenderMode, ReportConfig, SortKey, SortOrder,
};
use projtrack_net::{DocumentServer, DEFAULT_PORT};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::cloud::{downloaded_message, CloudSync, StatusKind, StatusMessage};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::prompt::confirm;
use crate::state::AppState;
use crate::views;

const SNAPSHOT_FILE: &str = "remote-collections.json";

#[derive(Parser)]
#[command(name = "projtrack")]
#[command(about = "Track design projects, their sanctions and reviews")]
pub struct Cli {
    /// Config file (default: config.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory holding the local database
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List projects, filtered, sorted and grouped
    List(ListArgs),
    /// Show every field of a project
    Show { id: String },
    /// Create a project
    Add(ProjectFields),
    /// Change fields of a project
    Edit {
        id: String,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Copy a project under a new id
    Duplicate { id: String },
    /// Delete a project
    Delete {
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Show or edit a project's history
    History {
        id: String,
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Count projects per design status
    Dashboard,
    /// Export an HTML report
    Report(ReportArgs),
    /// Replace the remote collection with the local projects
    Push {
        #[arg(long)]
        remote: Option<String>,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Replace the local projects with the remote collection
    Pull {
        #[arg(long)]
        remote: Option<String>,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Local storage, remote reachability and the latest sync outcome
    Status {
        #[arg(long)]
        remote: Option<String>,
    },
    /// Host a remote collection server
    Serve {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Where collections are saved (default: in the data dir)
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Append an entry
    Add {
        event: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Remove an entry by id or id prefix
    Remove { entry: String },
    /// Remove every entry
    Clear {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortCli {
    Name,
    District,
    Lac,
    Status,
    AsDate,
    ArDate,
    Updated,
}

impl From<SortCli> for SortKey {
    fn from(value: SortCli) -> Self {
        match value {
            SortCli::Name => SortKey::Name,
            SortCli::District => SortKey::District,
            SortCli::Lac => SortKey::Lac,
            SortCli::Status => SortKey::DesignStatus,
            SortCli::AsDate => SortKey::AsDate,
            SortCli::ArDate => SortKey::ArDate,
            SortCli::Updated => SortKey::UpdatedAt,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GroupCli {
    None,
    Status,
    District,
    Lac,
}

impl From<GroupCli> for GroupBy {
    fn from(value: GroupCli) -> Self {
        match value {
            GroupCli::None => GroupBy::None,
            GroupCli::Status => GroupBy::DesignStatus,
            GroupCli::District => GroupBy::District,
            GroupCli::Lac => GroupBy::Lac,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeCli {
    Preview,
    Print,
}

impl From<ModeCli> for RenderMode {
    fn from(value: ModeCli) -> Self {
        match value {
            ModeCli::Preview => RenderMode::Preview,
            ModeCli::Print => RenderMode::Print,
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    pub status: Option<DesignStatus>,
    #[arg(long)]
    pub district: Option<District>,
    #[arg(long)]
    pub lac: Option<String>,
    /// Earliest AS date (YYYY-MM-DD)
    #[arg(long)]
    pub as_from: Option<NaiveDate>,
    /// Latest AS date (YYYY-MM-DD)
    #[arg(long)]
    pub as_to: Option<NaiveDate>,
    #[arg(long)]
    pub area_min: Option<f64>,
    #[arg(long)]
    pub area_max: Option<f64>,
    #[arg(long, value_enum, default_value_t = SortCli::Updated)]
    pub sort: SortCli,
    #[arg(long, default_value_t = false)]
    pub asc: bool,
    #[arg(long, value_enum, default_value_t = GroupCli::None)]
    pub group_by: GroupCli,
}

impl ListArgs {
    pub fn query(&self) -> ProjectQuery {
        let mut filter = ProjectFilter {
            design_status: self.status,
            as_date_from: self.as_from,
            as_date_to: self.as_to,
            area_min: self.area_min,
            area_max: self.area_max,
            ..ProjectFilter::default()
        };
        filter.set_district(self.district);
        filter.lac = self.lac.clone().filter(|lac| !lac.trim().is_empty());

        ProjectQuery {
            filter,
            sort_by: self.sort.into(),
            sort_order: if self.asc {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            },
            group_by: self.group_by.into(),
        }
    }
}

/// Editable fields; an empty string clears a text or date field
#[derive(Args, Default)]
pub struct ProjectFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub district: Option<District>,
    #[arg(long)]
    pub lac: Option<String>,
    #[arg(long)]
    pub status: Option<DesignStatus>,
    #[arg(long)]
    pub as_status: Option<String>,
    #[arg(long)]
    pub as_number: Option<String>,
    #[arg(long)]
    pub as_date: Option<String>,
    #[arg(long)]
    pub sr: Option<String>,
    #[arg(long)]
    pub ar_status: Option<String>,
    #[arg(long)]
    pub ar_number: Option<String>,
    #[arg(long)]
    pub ar_date: Option<String>,
    #[arg(long)]
    pub ar_revision: Option<String>,
    #[arg(long)]
    pub ar_floors: Option<String>,
    #[arg(long)]
    pub ar_area: Option<String>,
    #[arg(long)]
    pub ae_name: Option<String>,
    #[arg(long)]
    pub ae_phone: Option<String>,
    #[arg(long)]
    pub aee_name: Option<String>,
    #[arg(long)]
    pub aee_phone: Option<String>,
    #[arg(long)]
    pub contractor: Option<String>,
    #[arg(long)]
    pub contractor_phone: Option<String>,
}

fn optional_date(raw: &str) -> Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw).map(Some).ok_or_else(|| {
        AppError::Core(projtrack_core::Error::Validation(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            raw
        )))
    })
}

fn set(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value.trim().to_string();
    }
}

impl ProjectFields {
    /// Copy the supplied fields into a draft; district before LAC
    pub fn apply(self, draft: &mut ProjectDraft) -> Result<()> {
        set(&mut draft.name, self.name);
        if let Some(district) = self.district {
            draft.set_district(district);
        }
        set(&mut draft.lac, self.lac);
        if let Some(status) = self.status {
            draft.design_status = status;
        }

        set(&mut draft.as_details.status, self.as_status);
        set(&mut draft.as_details.number, self.as_number);
        if let Some(raw) = self.as_date {
            draft.as_details.date = optional_date(&raw)?;
        }
        set(&mut draft.sr_details, self.sr);

        let ar = &mut draft.ar_details;
        set(&mut ar.status, self.ar_status);
        set(&mut ar.number, self.ar_number);
        if let Some(raw) = self.ar_date {
            ar.date = optional_date(&raw)?;
        }
        set(&mut ar.revision_details, self.ar_revision);
        set(&mut ar.number_of_floors, self.ar_floors);
        set(&mut ar.total_area, self.ar_area);

        let c = &mut draft.contacts;
        set(&mut c.ae_name, self.ae_name);
        set(&mut c.ae_phone, self.ae_phone);
        set(&mut c.aee_name, self.aee_name);
        set(&mut c.aee_phone, self.aee_phone);
        set(&mut c.contractor_name, self.contractor);
        set(&mut c.contractor_phone, self.contractor_phone);
        Ok(())
    }
}

#[derive(Args)]
pub struct ReportArgs {
    /// Report options file (TOML or JSON); default is [report] in the config
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// Write HTML here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ModeCli::Print)]
    pub mode: ModeCli,
    #[arg(long)]
    pub status: Option<DesignStatus>,
    #[arg(long)]
    pub district: Option<District>,
    #[arg(long, value_enum)]
    pub group_by: Option<GroupCli>,
    #[arg(long, value_enum)]
    pub sort: Option<SortCli>,
    #[arg(long, default_value_t = false)]
    pub desc: bool,
    /// Comma separated column ids, e.g. projectName,asDate,projectHistory
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl ReportArgs {
    pub fn resolve(&self, defaults: &ReportConfig) -> Result<ReportConfig> {
        let mut config = match &self.options {
            Some(path) => ReportConfig::load(path)?,
            None => defaults.clone(),
        };

        if let Some(status) = self.status {
            config.filter.design_status = Some(status);
        }
        if let Some(district) = self.district {
            config.set_district(Some(district));
        }
        if let Some(group_by) = self.group_by {
            config.group_by = group_by.into();
        }
        if let Some(sort) = self.sort {
            config.sort_by = sort.into();
        }
        if self.desc {
            config.sort_order = SortOrder::Desc;
        }
        if !self.columns.is_empty() {
            config.selected_columns = self
                .columns
                .iter()
                .map(|id| {
                    Column::from_id(id.trim()).ok_or_else(|| {
                        AppError::Core(projtrack_core::Error::ReportConfig(format!(
                            "Unknown column '{}'",
                            id
                        )))
                    })
                })
                .collect::<Result<_>>()?;
        }
        Ok(config)
    }
}

/// Parse-independent entry point
pub fn run(cli: Cli, runtime: &Runtime) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    if let Command::Serve { port, snapshot } = cli.command {
        let snapshot = match snapshot {
            Some(path) => path,
            None => config.data_dir()?.join(SNAPSHOT_FILE),
        };
        return serve(runtime, port, snapshot);
    }

    let mut state = AppState::new(config)?;
    dispatch(&mut state, cli.command, runtime)
}

fn dispatch(state: &mut AppState, command: Command, runtime: &Runtime) -> Result<()> {
    match command {
        Command::List(args) => {
            recent_status(state)?;
            let query = args.query();
            let groups = query.run(state.repo.projects());
            print!("{}", views::list_view(&groups, query.group_by != GroupBy::None));
        }
        Command::Show { id } => {
            let id = state.resolve_id(&id)?;
            if let Some(project) = state.repo.get(&id) {
                print!("{}", views::project_detail(project));
            }
        }
        Command::Add(fields) => {
            let mut draft = ProjectDraft::default();
            fields.apply(&mut draft)?;
            draft.validate()?;
            let project = state.repo.add(draft)?;
            println!("Added {} ({})", project.name, project.id);
        }
        Command::Edit { id, fields } => {
            let id = state.resolve_id(&id)?;
            edit(&mut state.repo, &id, fields)?;
        }
        Command::Duplicate { id } => {
            let id = state.resolve_id(&id)?;
            if let Some(copy) = state.repo.duplicate(&id)? {
                println!("Duplicated as {} ({})", copy.name, copy.id);
            }
        }
        Command::Delete { id, yes } => {
            let id = state.resolve_id(&id)?;
            let name = state
                .repo
                .get(&id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            if !confirm(&format!("Delete project '{}'?", name), yes)? {
                println!("Cancelled");
                return Ok(());
            }
            state.repo.delete(&id)?;
            println!("Deleted {}", name);
        }
        Command::History { id, action } => {
            let id = state.resolve_id(&id)?;
            history(&mut state.repo, &id, action)?;
        }
        Command::Dashboard => {
            recent_status(state)?;
            print!("{}", views::dashboard_view(state.repo.projects()));
        }
        Command::Report(args) => report(state, &args)?,
        Command::Push { remote, yes } => push(state, remote.as_deref(), yes, runtime)?,
        Command::Pull { remote, yes } => pull(state, remote.as_deref(), yes, runtime)?,
        Command::Status { remote } => status(state, remote.as_deref(), runtime)?,
        Command::Serve { .. } => {}
    }
    Ok(())
}

pub(crate) fn edit<S: ProjectStore>(
    repo: &mut ProjectRepository<S>,
    id: &projtrack_core::ProjectId,
    fields: ProjectFields,
) -> Result<()> {
    let project = repo
        .get(id)
        .ok_or_else(|| AppError::ProjectNotFound(id.to_string()))?;
    let mut draft = ProjectDraft::from_project(project);
    fields.apply(&mut draft)?;
    draft.validate()?;

    let name = draft.name.clone();
    repo.update(id, ProjectPatch::from_draft(draft))?;
    println!("Updated {}", name);
    Ok(())
}

pub(crate) fn history<S: ProjectStore>(
    repo: &mut ProjectRepository<S>,
    id: &projtrack_core::ProjectId,
    action: Option<HistoryAction>,
) -> Result<()> {
    let project = repo
        .get(id)
        .ok_or_else(|| AppError::ProjectNotFound(id.to_string()))?;
    let mut entries = project.history.clone();

    match action {
        None => {
            print!("{}", views::history_view(project));
            return Ok(());
        }
        Some(HistoryAction::Add { event, date }) => {
            entries.push(HistoryEntry::new(event.trim(), date));
        }
        Some(HistoryAction::Remove { entry }) => {
            let before = entries.len();
            entries.retain(|e| !e.id.starts_with(entry.trim()));
            if entries.len() == before {
                println!("No history entry matches '{}'", entry);
                return Ok(());
            }
        }
        Some(HistoryAction::Clear { yes }) => {
            if !confirm(&format!("Clear all history of '{}'?", project.name), yes)? {
                println!("Cancelled");
                return Ok(());
            }
            entries.clear();
        }
    }

    repo.update_history(id, clean_history(entries))?;
    if let Some(project) = repo.get(id) {
        print!("{}", views::history_view(project));
    }
    Ok(())
}

fn report(state: &AppState, args: &ReportArgs) -> Result<()> {
    let config = args.resolve(&state.config.report)?;
    let report = build_report(state.repo.projects(), &config, Utc::now());
    let html = render_html(&report, args.mode.into());

    match &args.output {
        Some(path) => {
            std::fs::write(path, html)?;
            info!(path = %path.display(), rows = report.meta.total_projects, "Report written");
            println!(
                "Wrote report with {} project(s) to {}",
                report.meta.total_projects,
                path.display()
            );
        }
        None => print!("{}", html),
    }
    Ok(())
}

/// Print a sync outcome and keep it for later commands
fn post_status(state: &AppState, status: &StatusMessage) {
    match status.kind {
        StatusKind::Success => println!("{}", status.text),
        StatusKind::Error => eprintln!("{}", status.text),
    }
    if let Err(e) = status.save(state.repo.store()) {
        warn!(error = %e, "Could not record sync status");
    }
}

/// Banner for a sync outcome that has not expired yet
fn recent_status(state: &AppState) -> Result<()> {
    if let Some(status) = StatusMessage::current(state.repo.store(), state.config.status_lifetime())? {
        print!("{}", views::status_banner(&status));
    }
    Ok(())
}

fn status(state: &AppState, remote: Option<&str>, runtime: &Runtime) -> Result<()> {
    let local = state.repo.store().slots().info(PROJECTS_SLOT)?;

    let remote_line = match state.config.remote_url(remote) {
        Ok(url) => {
            let sync = CloudSync::new(url, state.config.timeout());
            let line = match runtime.block_on(sync.check()) {
                Ok(rtt) => format!("{} (reachable, {} ms)", sync.remote(), rtt.as_millis()),
                Err(e) => {
                    warn!(remote = %sync.remote(), error = %e, "Remote check failed");
                    format!("{} (unreachable)", sync.remote())
                }
            };
            Some(line)
        }
        Err(AppError::NoRemote) => None,
        Err(e) => return Err(e),
    };

    let last = StatusMessage::current(state.repo.store(), state.config.status_lifetime())?;
    let overview = views::Overview {
        projects: state.repo.len(),
        data_dir: state.data_dir(),
        schema_version: state.repo.store().schema_version()?,
        local: local.as_ref(),
        remote: remote_line.as_deref(),
        last_sync: last.as_ref(),
    };
    print!("{}", views::status_view(&overview));
    Ok(())
}

fn push(state: &AppState, remote: Option<&str>, yes: bool, runtime: &Runtime) -> Result<()> {
    let remote = state.config.remote_url(remote)?;
    let question = format!(
        "Upload {} project(s) to cloud?\nThis will replace any existing data in the cloud with your local data.",
        state.repo.len()
    );
    if !confirm(&question, yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let sync = CloudSync::new(remote, state.config.timeout());
    let result = runtime.block_on(sync.push_all(state.repo.projects()));
    post_status(state, &StatusMessage::from_result(&result));
    result.map(drop)
}

fn pull(state: &mut AppState, remote: Option<&str>, yes: bool, runtime: &Runtime) -> Result<()> {
    let remote = state.config.remote_url(remote)?;
    let question = "Download projects from cloud?\nThis will replace your local data with data from the cloud. Your current local data will be lost.";
    if !confirm(question, yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let sync = CloudSync::new(remote, state.config.timeout());
    let result = runtime.block_on(sync.pull_all()).and_then(|projects| {
        let count = projects.len();
        state.repo.replace_all(projects)?;
        Ok(downloaded_message(count))
    });
    post_status(state, &StatusMessage::from_result(&result));
    result.map(drop)
}

fn serve(runtime: &Runtime, port: u16, snapshot: PathBuf) -> Result<()> {
    if let Some(parent) = snapshot.parent() {
        std::fs::create_dir_all(parent)?;
    }
    runtime.block_on(async {
        let server = DocumentServer::start(port, Some(snapshot)).await?;
        println!("Serving collections on {} (Ctrl+C to stop)", server.addr());
        tokio::signal::ctrl_c().await?;
        server.shutdown();
        Ok::<(), AppError>(())
    })
}
