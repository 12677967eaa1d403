//! Health check endpoints

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    }))
}

/// Ready check endpoint (verifies database connectivity)
pub async fn ready_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let status = if state.datastore.health_check().await.is_ok() {
        "ready"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
    }))
}
