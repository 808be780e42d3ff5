//! Administrative credential endpoints.
//!
//! The issuance response is the single disclosure point for a raw
//! secret; everything else on this surface deals in metadata only and
//! never echoes hashes or secrets back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::domain::{Credential, CredentialId, ProjectId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCredentialResponse {
    pub key_id: CredentialId,
    /// Shown exactly once; the control plane retains only the hash.
    pub raw_secret: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSummaryResponse {
    pub key_id: CredentialId,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl From<Credential> for CredentialSummaryResponse {
    fn from(credential: Credential) -> Self {
        Self {
            active: credential.is_active(),
            key_id: credential.id,
            created_at: credential.created_at,
            revoked_at: credential.revoked_at,
        }
    }
}

fn parse_project_id(id: &str) -> Result<ProjectId, ApiError> {
    ProjectId::parse(id).map_err(|_| ApiError::not_found(format!("project not found: '{}'", id)))
}

fn parse_credential_id(id: &str) -> Result<CredentialId, ApiError> {
    CredentialId::parse(id)
        .map_err(|_| ApiError::not_found(format!("credential not found: '{}'", id)))
}

pub async fn issue_credential_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<IssuedCredentialResponse>), ApiError> {
    let project_id = parse_project_id(&id)?;
    let (raw_secret, credential) = state.credentials.issue(&project_id).await?;

    let response = IssuedCredentialResponse {
        key_id: credential.id,
        raw_secret: raw_secret.expose().to_string(),
        created_at: credential.created_at,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_credentials_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CredentialSummaryResponse>>, ApiError> {
    let project_id = parse_project_id(&id)?;
    let credentials = state.credentials.list_for_project(&project_id).await?;
    Ok(Json(credentials.into_iter().map(CredentialSummaryResponse::from).collect()))
}

pub async fn revoke_credential_handler(
    State(state): State<ApiState>,
    Path((id, key_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let project_id = parse_project_id(&id)?;
    let credential_id = parse_credential_id(&key_id)?;
    state.credentials.revoke(&project_id, &credential_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
