use reqwest::StatusCode;
use thiserror::Error;

use crate::project::Project;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("Project {0} has not been stored yet")]
    Unsaved(String),

    #[error("Project not found: {0}")]
    NotFound(i64),
}

/// Failure raised by a backend when no versions can be retrieved for a project
#[derive(Debug, Error)]
#[error("{backend}: could not retrieve versions of {project}: {reason}")]
pub struct PluginError {
    pub backend: &'static str,
    pub project: String,
    pub project_id: Option<i64>,
    pub reason: PluginFailure,
}

impl PluginError {
    pub fn new(backend: &'static str, project: &Project, reason: PluginFailure) -> Self {
        Self {
            backend,
            project: project.name.clone(),
            project_id: project.id,
            reason,
        }
    }
}

#[derive(Debug, Error)]
pub enum PluginFailure {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: StatusCode, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No versions found")]
    NoVersions,
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
