//! Pagure git tags API backend

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::project::Project;
use crate::version::backend::Backend;
use crate::version::error::{PluginError, PluginFailure};
use crate::version::http::HttpClient;

/// Origin every Pagure project is looked up on
const DEFAULT_BASE_URL: &str = "https://pagure.io";

pub const BACKEND_NAME: &str = "pagure";

/// Response from `/api/0/<repo>/git/tags`
#[derive(Debug, Deserialize)]
struct TagsResponse {
    tags: Vec<String>,
}

/// Backend for projects hosted on pagure.io
pub struct PagureBackend {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl PagureBackend {
    /// Creates a PagureBackend querying pagure.io
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Creates a PagureBackend with a custom base URL
    pub fn with_base_url(client: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn error(&self, project: &Project, reason: PluginFailure) -> PluginError {
        PluginError::new(BACKEND_NAME, project, reason)
    }
}

#[async_trait]
impl Backend for PagureBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn get_version_url(&self, project: &Project) -> String {
        let repo = project
            .version_url
            .as_deref()
            .map(|path| path.trim_matches('/'))
            .filter(|path| !path.is_empty())
            .unwrap_or(project.name.as_str());

        format!("{}/api/0/{}/git/tags", self.base_url, repo)
    }

    async fn get_versions(&self, project: &Project) -> Result<Vec<String>, PluginError> {
        let url = self.get_version_url(project);
        debug!("Fetching Pagure tags for {}: {}", project, url);

        let response = self
            .client
            .fetch(&url, project.last_change)
            .await
            .map_err(|e| self.error(project, e.into()))?;

        if response.status == StatusCode::NOT_MODIFIED {
            debug!("Pagure tags of {} not modified", project);
            return Ok(Vec::new());
        }

        if response.status != StatusCode::OK {
            warn!("Pagure API returned status {}: {}", response.status, url);
            return Err(self.error(
                project,
                PluginFailure::UnexpectedStatus {
                    status: response.status,
                    url,
                },
            ));
        }

        let data: TagsResponse = serde_json::from_str(&response.body).map_err(|e| {
            warn!("Failed to parse Pagure tags response: {}", e);
            self.error(project, PluginFailure::InvalidResponse(e.to_string()))
        })?;

        let mut versions = data.tags;
        versions.sort();

        debug!("Found {} versions for project {}", versions.len(), project);

        Ok(versions)
    }
}
