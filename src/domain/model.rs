//! Project and credential records plus the derived worker snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CredentialId, ProjectId, SecretHash};

/// A tenant project. Deactivation is a soft delete: the row persists,
/// the project just stops appearing in worker snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub upstream_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project-scoped API credential. Only the hash is stored; rows are
/// never deleted, so `revoked_at` doubles as the audit trail.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: CredentialId,
    pub project_id: ProjectId,
    pub secret_hash: SecretHash,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// One entry in the worker-facing configuration: an active project with
/// its currently active credential hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfigEntry {
    pub project_id: ProjectId,
    pub upstream_url: String,
    pub credential_hash: SecretHash,
}

/// The worker-facing view of current state. Derived fresh on every
/// authenticated fetch; never persisted, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfigSnapshot {
    pub projects: Vec<WorkerConfigEntry>,
}
