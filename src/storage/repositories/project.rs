//! Project repository.
//!
//! Projects are soft-deleted: `deactivate` flips the `active` flag and
//! leaves the row (and its credential history) in place.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use crate::domain::{Project, ProjectId};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct ProjectRow {
    pub id: String,
    pub name: String,
    pub upstream_url: String,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: ProjectId::from_string(row.id),
            name: row.name,
            upstream_url: row.upstream_url,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// New project data, already validated by the service layer.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub id: ProjectId,
    pub name: String,
    pub upstream_url: String,
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: NewProject) -> Result<Project>;
    async fn get(&self, id: &ProjectId) -> Result<Project>;
    /// All projects, newest first. Administrative listing.
    async fn list(&self) -> Result<Vec<Project>>;
    /// Active projects in creation order; drives snapshot assembly, so
    /// the ordering must be stable across identical state.
    async fn list_active(&self) -> Result<Vec<Project>>;
    async fn update_upstream(&self, id: &ProjectId, upstream_url: &str) -> Result<Project>;
    /// Idempotent: deactivating an already-inactive project is a no-op
    /// success. Only an unknown id is an error.
    async fn deactivate(&self, id: &ProjectId) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SqlxProjectRepository {
    pool: DbPool,
}

impl SqlxProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
    async fn create(&self, project: NewProject) -> Result<Project> {
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO projects (id, name, upstream_url, active, created_at, updated_at) \
             VALUES ($1, $2, $3, TRUE, $4, $5)",
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.upstream_url)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to create project"))?;

        self.get(&project.id).await
    }

    async fn get(&self, id: &ProjectId) -> Result<Project> {
        let row: Option<ProjectRow> = sqlx::query_as(
            "SELECT id, name, upstream_url, active, created_at, updated_at \
             FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to fetch project"))?;

        row.map(Project::from).ok_or_else(|| Error::not_found("project", id.as_str()))
    }

    async fn list(&self) -> Result<Vec<Project>> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT id, name, upstream_url, active, created_at, updated_at \
             FROM projects ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to list projects"))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn list_active(&self) -> Result<Vec<Project>> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT id, name, upstream_url, active, created_at, updated_at \
             FROM projects WHERE active = TRUE ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to list active projects"))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn update_upstream(&self, id: &ProjectId, upstream_url: &str) -> Result<Project> {
        let result = sqlx::query(
            "UPDATE projects SET upstream_url = $1, updated_at = $2 \
             WHERE id = $3 AND active = TRUE",
        )
        .bind(upstream_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to update project upstream"))?;

        if result.rows_affected() == 0 {
            // Distinguish a missing project from a deactivated one.
            let project = self.get(id).await?;
            if !project.active {
                return Err(Error::conflict(format!(
                    "Project '{}' is deactivated and cannot be updated",
                    id
                )));
            }
        }

        self.get(id).await
    }

    async fn deactivate(&self, id: &ProjectId) -> Result<()> {
        let result =
            sqlx::query("UPDATE projects SET active = FALSE, updated_at = $1 WHERE id = $2")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|err| Error::database(err, "Failed to deactivate project"))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("project", id.as_str()));
        }

        Ok(())
    }
}
