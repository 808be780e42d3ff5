//! Assembly of the worker-facing configuration snapshot.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::{WorkerConfigEntry, WorkerConfigSnapshot};
use crate::errors::Result;
use crate::storage::{
    CredentialRepository, DbPool, ProjectRepository, SqlxCredentialRepository,
    SqlxProjectRepository,
};

#[derive(Clone)]
pub struct SnapshotService {
    projects: Arc<dyn ProjectRepository>,
    credentials: Arc<dyn CredentialRepository>,
}

impl SnapshotService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        credentials: Arc<dyn CredentialRepository>,
    ) -> Self {
        Self { projects, credentials }
    }

    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(
            Arc::new(SqlxProjectRepository::new(pool.clone())),
            Arc::new(SqlxCredentialRepository::new(pool)),
        )
    }

    /// Build the snapshot straight from current database state.
    ///
    /// Deliberately uncached: a committed revocation must be visible to
    /// the very next build, so memoizing here would reintroduce the
    /// propagation lag this design exists to rule out. Projects with no
    /// active credential are omitted entirely rather than emitted with
    /// an empty hash. Entry order follows the registry's creation-time
    /// listing, so identical state yields identical snapshots.
    #[instrument(skip(self))]
    pub async fn build(&self) -> Result<WorkerConfigSnapshot> {
        let active_projects = self.projects.list_active().await?;
        let mut entries = Vec::with_capacity(active_projects.len());

        for project in active_projects {
            if let Some(credential) = self.credentials.active_for(&project.id).await? {
                entries.push(WorkerConfigEntry {
                    project_id: project.id,
                    upstream_url: project.upstream_url,
                    credential_hash: credential.secret_hash,
                });
            }
        }

        Ok(WorkerConfigSnapshot { projects: entries })
    }
}
