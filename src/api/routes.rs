use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::WorkerAuthGate;
use crate::services::{CredentialService, ProjectService, SnapshotService};
use crate::storage::DbPool;

use super::handlers::{
    create_project_handler, delete_project_handler, get_project_handler, issue_credential_handler,
    list_credentials_handler, list_projects_handler, revoke_credential_handler,
    update_project_handler, worker_config_handler,
};

/// Shared state for all handlers. Services are cheap clones over the
/// same pool; the worker gate carries the immutable shared secret.
#[derive(Clone)]
pub struct ApiState {
    pub projects: ProjectService,
    pub credentials: CredentialService,
    pub snapshots: SnapshotService,
    pub worker_gate: WorkerAuthGate,
}

impl ApiState {
    pub fn new(pool: DbPool, worker_shared_secret: impl Into<String>) -> Self {
        Self {
            projects: ProjectService::with_sqlx(pool.clone()),
            credentials: CredentialService::with_sqlx(pool.clone()),
            snapshots: SnapshotService::with_sqlx(pool),
            worker_gate: WorkerAuthGate::new(worker_shared_secret),
        }
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/projects", post(create_project_handler).get(list_projects_handler))
        .route(
            "/projects/{id}",
            get(get_project_handler)
                .patch(update_project_handler)
                .delete(delete_project_handler),
        )
        .route(
            "/projects/{id}/keys",
            post(issue_credential_handler).get(list_credentials_handler),
        )
        .route("/projects/{id}/keys/{key_id}", delete(revoke_credential_handler))
        .route("/internal/worker/config", get(worker_config_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
