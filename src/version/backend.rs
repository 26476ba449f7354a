//! Backend trait for retrieving upstream versions of a project

#[cfg(test)]
use mockall::automock;

use crate::project::Project;
use crate::version::error::{PluginError, PluginFailure};
use crate::version::ordering::latest_version;

/// A version source for one upstream hosting service
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Tag stored in `Project::backend` selecting this implementation
    fn name(&self) -> &'static str;

    /// URL queried for the project's versions
    fn get_version_url(&self, project: &Project) -> String;

    /// Fetches all versions of a project
    ///
    /// # Returns
    /// * `Ok(versions)` - Versions sorted in ascending lexicographic order,
    ///   empty when upstream reports no change since `project.last_change`
    /// * `Err(PluginError)` - If the versions could not be retrieved
    async fn get_versions(&self, project: &Project) -> Result<Vec<String>, PluginError>;

    /// Returns the current version, the highest one `get_versions` reports
    /// under version ordering ("0.1.16" over "0.1.9")
    async fn get_version(&self, project: &Project) -> Result<String, PluginError> {
        let versions = self.get_versions(project).await?;
        latest_version(&versions)
            .cloned()
            .ok_or_else(|| PluginError::new(self.name(), project, PluginFailure::NoVersions))
    }
}
