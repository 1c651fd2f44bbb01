//! Application configuration
//!
//! Read from `config.toml` in the platform config directory unless a path is
//! given on the command line. A missing default file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use projtrack_core::ReportConfig;
use projtrack_net::RemoteUrl;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AppError, Result};

const CONFIG_FILE: &str = "config.toml";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "projtrack", "projtrack")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the local database; platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Remote collection, e.g. `projtrack://192.168.1.10:7341/projects`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    pub timeout_secs: u64,
    /// How long a sync status message stays visible
    pub status_message_secs: u64,
    /// Defaults for `projtrack report`
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            remote: None,
            timeout_secs: 10,
            status_message_secs: 5,
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, or from the default location if present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| AppError::Config("Could not determine data directory".into()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn status_lifetime(&self) -> Duration {
        Duration::from_secs(self.status_message_secs)
    }

    /// The configured remote, with an optional command-line override
    pub fn remote_url(&self, cli_override: Option<&str>) -> Result<RemoteUrl> {
        let raw = cli_override
            .or(self.remote.as_deref())
            .ok_or(AppError::NoRemote)?;
        Ok(RemoteUrl::parse(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projtrack_core::{GroupBy, PageStyle};

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.status_lifetime(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
data_dir = "/srv/projtrack"
remote = "projtrack://10.0.0.5:7400/projects"
timeout_secs = 3
status_message_secs = 8

[report]
pageStyle = "portrait"
groupBy = "lac"
selectedColumns = ["projectName", "projectHistory"]
"#,
        )
        .unwrap();

        assert_eq!(config.data_dir.as_deref(), Some(Path::new("/srv/projtrack")));
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.report.page_style, PageStyle::Portrait);
        assert_eq!(config.report.group_by, GroupBy::Lac);

        let remote = config.remote_url(None).unwrap();
        assert_eq!(remote.authority(), "10.0.0.5:7400");
    }

    #[test]
    fn test_remote_override_and_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.remote_url(None), Err(AppError::NoRemote)));

        let remote = config
            .remote_url(Some("projtrack://localhost:7500/archive"))
            .unwrap();
        assert_eq!(remote.collection, "archive");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let result = AppConfig::from_toml_str("timeout_secs = \"soon\"");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projtrack.toml");
        std::fs::write(&path, "timeout_secs = 30\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.timeout_secs, 30);

        let missing = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(missing, Err(AppError::Io(_))));
    }
}
