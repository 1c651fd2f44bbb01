//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] projtrack_core::Error),

    #[error("Network error: {0}")]
    Net(#[from] projtrack_net::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// User-facing cloud failure text; details are logged
    #[error("{0}")]
    Cloud(String),

    #[error("A cloud sync is already in progress")]
    SyncInProgress,

    #[error("No remote configured. Set `remote` in the config file or pass --remote")]
    NoRemote,

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Project id prefix '{0}' matches more than one project")]
    AmbiguousId(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Errors already shown to the user as a status message
    pub fn is_reported(&self) -> bool {
        matches!(self, AppError::Cloud(_) | AppError::SyncInProgress)
    }
}
