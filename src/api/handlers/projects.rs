//! Administrative project endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::domain::{Project, ProjectId};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub upstream: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectBody {
    pub upstream: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub name: String,
    pub upstream: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            upstream: project.upstream_url,
            active: project.active,
            created_at: project.created_at,
        }
    }
}

fn parse_project_id(id: &str) -> Result<ProjectId, ApiError> {
    ProjectId::parse(id).map_err(|_| ApiError::not_found(format!("project not found: '{}'", id)))
}

pub async fn create_project_handler(
    State(state): State<ApiState>,
    Json(body): Json<CreateProjectBody>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    body.validate().map_err(crate::errors::Error::from)?;
    let project = state.projects.create(&body.name, &body.upstream).await?;
    Ok((StatusCode::CREATED, Json(project.into())))
}

pub async fn list_projects_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = state.projects.list().await?;
    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

pub async fn get_project_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project_id = parse_project_id(&id)?;
    let project = state.projects.get(&project_id).await?;
    Ok(Json(project.into()))
}

pub async fn update_project_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectBody>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project_id = parse_project_id(&id)?;
    let project = state.projects.update_upstream(&project_id, &body.upstream).await?;
    Ok(Json(project.into()))
}

pub async fn delete_project_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let project_id = parse_project_id(&id)?;
    state.projects.deactivate(&project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
