//! Credential repository.
//!
//! Owns the at-most-one-active-credential-per-project invariant at the
//! storage boundary: issuance is a single compare-revoke-then-insert
//! transaction, never two separate calls from the service layer. A
//! partial unique index on `(project_id) WHERE revoked_at IS NULL`
//! backs the same invariant against concurrent writers.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use crate::domain::{Credential, CredentialId, ProjectId, SecretHash};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct CredentialRow {
    pub id: String,
    pub project_id: String,
    pub secret_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub revoked_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Credential {
            id: CredentialId::from_string(row.id),
            project_id: ProjectId::from_string(row.project_id),
            secret_hash: SecretHash::from_string(row.secret_hash),
            created_at: row.created_at,
            revoked_at: row.revoked_at,
        }
    }
}

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Atomically revoke any currently active credential for the project
    /// and insert a new one. Callers never observe two live credentials,
    /// nor a window with zero credentials on a project that had one.
    async fn insert_active(
        &self,
        project_id: &ProjectId,
        credential_id: &CredentialId,
        secret_hash: &SecretHash,
    ) -> Result<Credential>;

    /// Set `revoked_at` on an active credential. `NotFound` when the
    /// credential does not belong to the project; `Conflict` when it is
    /// already revoked, so double-revocation attempts surface.
    async fn revoke(&self, project_id: &ProjectId, credential_id: &CredentialId) -> Result<()>;

    async fn active_for(&self, project_id: &ProjectId) -> Result<Option<Credential>>;

    /// Full credential history for a project, newest first.
    async fn list_for_project(&self, project_id: &ProjectId) -> Result<Vec<Credential>>;
}

#[derive(Debug, Clone)]
pub struct SqlxCredentialRepository {
    pool: DbPool,
}

impl SqlxCredentialRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for SqlxCredentialRepository {
    async fn insert_active(
        &self,
        project_id: &ProjectId,
        credential_id: &CredentialId,
        secret_hash: &SecretHash,
    ) -> Result<Credential> {
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| Error::database(err, "Failed to begin credential swap transaction"))?;

        sqlx::query(
            "UPDATE api_credentials SET revoked_at = $1 \
             WHERE project_id = $2 AND revoked_at IS NULL",
        )
        .bind(now)
        .bind(project_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| Error::database(err, "Failed to revoke superseded credential"))?;

        sqlx::query(
            "INSERT INTO api_credentials (id, project_id, secret_hash, created_at, revoked_at) \
             VALUES ($1, $2, $3, $4, NULL)",
        )
        .bind(credential_id)
        .bind(project_id)
        .bind(secret_hash)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|err| Error::database(err, "Failed to insert credential"))?;

        tx.commit()
            .await
            .map_err(|err| Error::database(err, "Failed to commit credential swap"))?;

        Ok(Credential {
            id: credential_id.clone(),
            project_id: project_id.clone(),
            secret_hash: secret_hash.clone(),
            created_at: now,
            revoked_at: None,
        })
    }

    async fn revoke(&self, project_id: &ProjectId, credential_id: &CredentialId) -> Result<()> {
        let result = sqlx::query(
            "UPDATE api_credentials SET revoked_at = $1 \
             WHERE id = $2 AND project_id = $3 AND revoked_at IS NULL",
        )
        .bind(Utc::now())
        .bind(credential_id)
        .bind(project_id)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to revoke credential"))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // No active row matched: either the credential is unknown for
        // this project, or it was already revoked.
        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT id, project_id, secret_hash, created_at, revoked_at \
             FROM api_credentials WHERE id = $1 AND project_id = $2",
        )
        .bind(credential_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to look up credential after revoke"))?;

        match row {
            Some(_) => Err(Error::conflict(format!(
                "Credential '{}' is already revoked",
                credential_id
            ))),
            None => Err(Error::not_found("credential", credential_id.as_str())),
        }
    }

    async fn active_for(&self, project_id: &ProjectId) -> Result<Option<Credential>> {
        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT id, project_id, secret_hash, created_at, revoked_at \
             FROM api_credentials WHERE project_id = $1 AND revoked_at IS NULL",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to fetch active credential"))?;

        Ok(row.map(Credential::from))
    }

    async fn list_for_project(&self, project_id: &ProjectId) -> Result<Vec<Credential>> {
        let rows: Vec<CredentialRow> = sqlx::query_as(
            "SELECT id, project_id, secret_hash, created_at, revoked_at \
             FROM api_credentials WHERE project_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::database(err, "Failed to list credentials"))?;

        Ok(rows.into_iter().map(Credential::from).collect())
    }
}
