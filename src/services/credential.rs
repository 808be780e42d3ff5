//! Business logic for issuing and revoking project credentials.
//!
//! The raw secret exists only on the issuance path: generated here,
//! hashed immediately, handed back to the caller exactly once. It is
//! never stored and never logged.

use std::sync::Arc;

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{info, instrument, warn};

use crate::auth::CredentialHasher;
use crate::domain::{Credential, CredentialId, ProjectId, RawSecret, SecretHash};
use crate::errors::{Error, Result};
use crate::storage::{
    CredentialRepository, DbPool, ProjectRepository, SqlxCredentialRepository,
    SqlxProjectRepository,
};

const SECRET_LENGTH: usize = 48;

#[derive(Clone)]
pub struct CredentialService {
    credentials: Arc<dyn CredentialRepository>,
    projects: Arc<dyn ProjectRepository>,
    hasher: CredentialHasher,
}

impl CredentialService {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        projects: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self { credentials, projects, hasher: CredentialHasher::new() }
    }

    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(
            Arc::new(SqlxCredentialRepository::new(pool.clone())),
            Arc::new(SqlxProjectRepository::new(pool)),
        )
    }

    fn generate_secret() -> RawSecret {
        let secret: String =
            OsRng.sample_iter(&Alphanumeric).take(SECRET_LENGTH).map(char::from).collect();
        RawSecret::new(secret)
    }

    /// Issue a fresh credential for the project, atomically revoking any
    /// currently active one. The returned [`RawSecret`] is the only copy
    /// that will ever exist.
    ///
    /// A failed swap is retried once with fresh transaction semantics;
    /// a second failure surfaces as `Conflict` so the caller knows to
    /// retry the whole operation.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn issue(&self, project_id: &ProjectId) -> Result<(RawSecret, Credential)> {
        self.projects.get(project_id).await?;

        let secret = Self::generate_secret();
        let secret_hash = self.hasher.hash(&secret)?;

        let credential = match self.try_insert(project_id, &secret_hash).await {
            Ok(credential) => credential,
            Err(err) => {
                warn!(project_id = %project_id, error = %err, "credential swap failed, retrying once");
                self.try_insert(project_id, &secret_hash).await.map_err(|retry_err| {
                    Error::conflict(format!(
                        "Credential issuance for project '{}' failed after retry: {}",
                        project_id, retry_err
                    ))
                })?
            }
        };

        info!(project_id = %project_id, credential_id = %credential.id, "credential issued");
        Ok((secret, credential))
    }

    async fn try_insert(
        &self,
        project_id: &ProjectId,
        secret_hash: &SecretHash,
    ) -> Result<Credential> {
        let credential_id = CredentialId::new();
        self.credentials.insert_active(project_id, &credential_id, secret_hash).await
    }

    /// Revoke an active credential. `Conflict` on double revocation.
    #[instrument(skip(self), fields(project_id = %project_id, credential_id = %credential_id))]
    pub async fn revoke(
        &self,
        project_id: &ProjectId,
        credential_id: &CredentialId,
    ) -> Result<()> {
        self.projects.get(project_id).await?;
        self.credentials.revoke(project_id, credential_id).await?;
        info!(project_id = %project_id, credential_id = %credential_id, "credential revoked");
        Ok(())
    }

    /// The currently active credential for a project, if any.
    pub async fn active_for(&self, project_id: &ProjectId) -> Result<Option<Credential>> {
        self.credentials.active_for(project_id).await
    }

    /// Credential history for a project, newest first.
    pub async fn list_for_project(&self, project_id: &ProjectId) -> Result<Vec<Credential>> {
        self.projects.get(project_id).await?;
        self.credentials.list_for_project(project_id).await
    }

    /// Verify a candidate secret against a stored hash. Used by any live
    /// verification path; constant time, never reconstructs the secret.
    pub fn verify(&self, stored: &SecretHash, candidate: &str) -> bool {
        self.hasher.verify(stored, candidate)
    }
}
