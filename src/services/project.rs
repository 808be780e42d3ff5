//! Business logic for the project registry.

use std::sync::Arc;

use tracing::{info, instrument};
use url::Url;

use crate::domain::{Project, ProjectId};
use crate::errors::{Error, Result};
use crate::storage::{DbPool, NewProject, ProjectRepository, SqlxProjectRepository};

#[derive(Clone)]
pub struct ProjectService {
    repository: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(Arc::new(SqlxProjectRepository::new(pool)))
    }

    /// Reject anything that is not an absolute http(s) URL with a host.
    fn validate_upstream(upstream_url: &str) -> Result<()> {
        let parsed = Url::parse(upstream_url)
            .map_err(|err| Error::validation(format!("Invalid upstream URL: {}", err)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::validation(format!(
                "Upstream URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if parsed.host_str().is_none() {
            return Err(Error::validation("Upstream URL must include a host"));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, upstream_url: &str) -> Result<Project> {
        if name.trim().is_empty() {
            return Err(Error::validation("Project name cannot be empty"));
        }
        Self::validate_upstream(upstream_url)?;

        let new_project = NewProject {
            id: ProjectId::new(),
            name: name.trim().to_string(),
            upstream_url: upstream_url.to_string(),
        };

        let project = self.repository.create(new_project).await?;
        info!(project_id = %project.id, "project created");
        Ok(project)
    }

    pub async fn get(&self, id: &ProjectId) -> Result<Project> {
        self.repository.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        self.repository.list().await
    }

    pub async fn list_active(&self) -> Result<Vec<Project>> {
        self.repository.list_active().await
    }

    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn update_upstream(&self, id: &ProjectId, upstream_url: &str) -> Result<Project> {
        Self::validate_upstream(upstream_url)?;
        let project = self.repository.update_upstream(id, upstream_url).await?;
        info!(project_id = %project.id, "project upstream updated");
        Ok(project)
    }

    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn deactivate(&self, id: &ProjectId) -> Result<()> {
        self.repository.deactivate(id).await?;
        info!(project_id = %id, "project deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_upstream_accepts_http_and_https() {
        assert!(ProjectService::validate_upstream("https://api.example.com").is_ok());
        assert!(ProjectService::validate_upstream("http://10.0.0.5:8080/base").is_ok());
    }

    #[test]
    fn validate_upstream_rejects_other_schemes_and_garbage() {
        assert!(ProjectService::validate_upstream("ftp://example.com").is_err());
        assert!(ProjectService::validate_upstream("not a url").is_err());
        assert!(ProjectService::validate_upstream("").is_err());
        assert!(ProjectService::validate_upstream("example.com/no-scheme").is_err());
    }
}
