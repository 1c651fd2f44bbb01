//! Cloud sync for the app
//!
//! Push replaces the remote collection with the local projects; pull reads
//! the remote collection back. Only one of them may run at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use projtrack_core::storage::{project_from_document, project_to_document};
use projtrack_core::{Database, Project};
use projtrack_net::{Document, DocumentClient, RemoteUrl};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, Result};

pub const UPLOAD_FAILED: &str =
    "Failed to upload data to cloud. Please check your internet connection and try again.";
pub const DOWNLOAD_FAILED: &str =
    "Failed to download data from cloud. Please check your internet connection and try again.";

/// Slot holding the outcome of the last push or pull
pub const SYNC_STATUS_SLOT: &str = "sync-status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// Dismissible outcome of a push or pull
///
/// Kept in the local database so later commands can show it until it
/// expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
            shown_at: Utc::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
            shown_at: Utc::now(),
        }
    }

    pub fn from_result(result: &Result<String>) -> Self {
        match result {
            Ok(text) => Self::success(text.clone()),
            Err(e) => Self::error(e.to_string()),
        }
    }

    /// A message stamped in the future never counts as expired
    pub fn is_expired_at(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        (now - self.shown_at)
            .to_std()
            .is_ok_and(|age| age >= lifetime)
    }

    /// Remember this message as the latest sync outcome
    pub fn save(&self, db: &Database) -> Result<()> {
        let raw = serde_json::to_string(self).map_err(projtrack_core::Error::from)?;
        db.slots().set(SYNC_STATUS_SLOT, &raw)?;
        Ok(())
    }

    /// Latest sync outcome while it is still showing
    ///
    /// An expired or unreadable message is dismissed from the slot.
    pub fn current(db: &Database, lifetime: Duration) -> Result<Option<Self>> {
        let slots = db.slots();
        let Some(raw) = slots.get(SYNC_STATUS_SLOT)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(message) if !message.is_expired_at(Utc::now(), lifetime) => Ok(Some(message)),
            Ok(_) => {
                slots.remove(SYNC_STATUS_SLOT)?;
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Dropping unreadable sync status");
                slots.remove(SYNC_STATUS_SLOT)?;
                Ok(None)
            }
        }
    }
}

/// Clears the busy flag when a sync ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub fn downloaded_message(count: usize) -> String {
    format!("Successfully downloaded {} project(s) from cloud", count)
}

/// Push/pull manager for one remote collection
pub struct CloudSync {
    remote: RemoteUrl,
    timeout: Duration,
    busy: AtomicBool,
}

impl CloudSync {
    pub fn new(remote: RemoteUrl, timeout: Duration) -> Self {
        Self {
            remote,
            timeout,
            busy: AtomicBool::new(false),
        }
    }

    pub fn remote(&self) -> &RemoteUrl {
        &self.remote
    }

    fn begin(&self) -> Result<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::SyncInProgress)?;
        Ok(BusyGuard(&self.busy))
    }

    async fn connect(&self) -> projtrack_net::Result<DocumentClient> {
        DocumentClient::connect(&self.remote.authority(), self.timeout).await
    }

    /// Connect and ping the remote; returns the round trip time
    pub async fn check(&self) -> Result<Duration> {
        let mut client = self.connect().await?;
        Ok(client.ping().await?)
    }

    /// Replace the remote collection with `projects`
    pub async fn push_all(&self, projects: &[Project]) -> Result<String> {
        let _busy = self.begin()?;

        let documents = projects
            .iter()
            .map(|p| project_to_document(p).map(|(id, fields)| Document::new(id, fields)))
            .collect::<projtrack_core::Result<Vec<_>>>()?;

        let upload = async {
            let mut client = self.connect().await?;
            client
                .replace_collection(&self.remote.collection, documents)
                .await
        };

        match upload.await {
            Ok(count) => {
                info!(remote = %self.remote, count, "Pushed projects");
                Ok(format!("Successfully uploaded {} project(s) to cloud", count))
            }
            Err(e) => {
                warn!(remote = %self.remote, error = %e, "Push failed");
                Err(AppError::Cloud(UPLOAD_FAILED.into()))
            }
        }
    }

    /// Read every project in the remote collection
    pub async fn pull_all(&self) -> Result<Vec<Project>> {
        let _busy = self.begin()?;

        let download = async {
            let mut client = self.connect().await?;
            client.fetch_collection(&self.remote.collection).await
        };

        let documents = match download.await {
            Ok(documents) => documents,
            Err(e) => {
                warn!(remote = %self.remote, error = %e, "Pull failed");
                return Err(AppError::Cloud(DOWNLOAD_FAILED.into()));
            }
        };

        let mut projects = Vec::with_capacity(documents.len());
        for doc in documents {
            match project_from_document(&doc.id, doc.fields) {
                Ok(project) => projects.push(project),
                Err(e) => {
                    warn!(id = %doc.id, error = %e, "Unreadable remote document");
                    return Err(AppError::Cloud(DOWNLOAD_FAILED.into()));
                }
            }
        }

        info!(remote = %self.remote, count = projects.len(), "Pulled projects");
        Ok(projects)
    }
}
