//! Release checks for stored projects
//!
//! A check runs the project's backend, records the versions it has not seen
//! before and moves the project's latest version and last change forward.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::CHECK_STAGGER_DELAY_MS;
use crate::project::Project;
use crate::version::error::CheckError;
use crate::version::ordering::latest_version;
use crate::version::registry::BackendRegistry;
use crate::version::store::ProjectStore;

/// Result of checking one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub project: Project,
    /// Versions reported upstream that were not known before this check
    pub new_versions: Vec<String>,
}

/// Checks a single stored project for new upstream versions
pub async fn check_project<S: ProjectStore + ?Sized>(
    store: &S,
    registry: &BackendRegistry,
    project_id: i64,
    now: DateTime<Utc>,
) -> Result<CheckOutcome, CheckError> {
    let mut project = store
        .get(project_id)?
        .ok_or(CheckError::ProjectNotFound(project_id))?;

    let backend = registry
        .get(&project.backend)
        .ok_or_else(|| CheckError::UnknownBackend(project.backend.clone()))?;

    let upstream = backend.get_versions(&project).await?;
    let known = store.versions(project_id)?;

    let mut new_versions: Vec<String> = Vec::new();
    for version in upstream {
        if !known.contains(&version) && !new_versions.contains(&version) {
            new_versions.push(version);
        }
    }

    if new_versions.is_empty() {
        debug!("No new versions for {}", project);
        return Ok(CheckOutcome {
            project,
            new_versions,
        });
    }

    project.latest_version = latest_version(known.iter().chain(&new_versions)).cloned();
    project.last_change = Some(now);
    store.commit(&project, &new_versions)?;

    info!(
        "Found {} new versions for {}, latest is {:?}",
        new_versions.len(),
        project,
        project.latest_version
    );

    Ok(CheckOutcome {
        project,
        new_versions,
    })
}

/// Checks every stored project, returning one result per project id
///
/// A failing project does not prevent the others from being checked.
pub async fn check_all<S: ProjectStore + ?Sized>(
    store: &S,
    registry: &BackendRegistry,
    now: DateTime<Utc>,
) -> Result<Vec<(i64, Result<CheckOutcome, CheckError>)>, CheckError> {
    let ids: Vec<i64> = store.list()?.into_iter().filter_map(|p| p.id).collect();
    info!("Checking {} projects", ids.len());

    let futures = ids.into_iter().enumerate().map(|(i, id)| async move {
        // Stagger requests to avoid rate limiting
        sleep(Duration::from_millis(i as u64 * CHECK_STAGGER_DELAY_MS)).await;
        let result = check_project(store, registry, id, now).await;
        if let Err(e) = &result {
            error!("Check of project #{} failed: {}", id, e);
        }
        (id, result)
    });

    Ok(join_all(futures).await)
}
