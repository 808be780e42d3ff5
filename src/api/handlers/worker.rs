//! Internal worker configuration endpoint.

use axum::{extract::State, http::HeaderMap, Json};

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::domain::WorkerConfigSnapshot;

pub const WORKER_SECRET_HEADER: &str = "x-worker-secret";

/// `GET /internal/worker/config`
///
/// Releases the current snapshot only after the shared-secret gate
/// passes. The 401 is identical for a missing header and a wrong value,
/// and nothing is built before authentication, so a failed fetch never
/// yields partial data.
pub async fn worker_config_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Json<WorkerConfigSnapshot>, ApiError> {
    let presented = headers
        .get(WORKER_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !state.worker_gate.authenticate(presented) {
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    let snapshot = state.snapshots.build().await?;
    Ok(Json(snapshot))
}
