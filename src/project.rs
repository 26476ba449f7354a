//! Monitored upstream project records

use chrono::{DateTime, Utc};

/// A monitored upstream project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Database id, `None` until the project has been stored
    pub id: Option<i64>,
    pub name: String,
    pub homepage: String,
    /// Tag of the backend that retrieves versions (e.g. "pagure")
    pub backend: String,
    /// Repository path overriding `name` when building the backend URL
    pub version_url: Option<String>,
    pub latest_version: Option<String>,
    /// When new versions were last recorded, sent upstream as a conditional fetch token
    pub last_change: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates an unsaved project with no version history
    pub fn new(name: &str, homepage: &str, backend: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            homepage: homepage.to_string(),
            backend: backend.to_string(),
            version_url: None,
            latest_version: None,
            last_change: None,
        }
    }

    pub fn with_version_url(mut self, version_url: &str) -> Self {
        self.version_url = Some(version_url.to_string());
        self
    }
}

/// Fields supplied when creating a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub homepage: String,
    pub backend: String,
    pub version_url: Option<String>,
}

impl NewProject {
    pub fn new(name: &str, homepage: &str, backend: &str) -> Self {
        Self {
            name: name.to_string(),
            homepage: homepage.to_string(),
            backend: backend.to_string(),
            version_url: None,
        }
    }

    pub fn with_version_url(mut self, version_url: Option<String>) -> Self {
        self.version_url = version_url;
        self
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} (#{})", self.name, id),
            None => write!(f, "{}", self.name),
        }
    }
}
