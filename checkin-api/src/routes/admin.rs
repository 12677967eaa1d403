//! Administrative endpoints

use axum::{extract::State, Json};
use checkin_core::UserId;

use crate::dto::{PurgeRequest, PurgeResponse, SetRoleRequest, UserResponse};
use crate::error::{ApiError, ApiResult};
use crate::routes::users::{parse_role, user_to_response};
use crate::state::AppState;

/// Bulk purge every account with a role, cascading all dependent rows
/// (director-only)
pub async fn purge_role(
    State(state): State<AppState>,
    Json(req): Json<PurgeRequest>,
) -> ApiResult<Json<PurgeResponse>> {
    let target = parse_role(&req.role)?;
    let actor = require_actor(&state, &req.actor_id).await?;

    let summary = state.admin.purge_role(&actor, target).await?;

    Ok(Json(PurgeResponse {
        role: summary.role.as_str().to_string(),
        users_removed: summary.users_removed,
    }))
}

/// Administrative role override (director-only)
pub async fn set_role(
    State(state): State<AppState>,
    Json(req): Json<SetRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let role = parse_role(&req.role)?;
    let actor = require_actor(&state, &req.actor_id).await?;

    let updated = state
        .admin
        .set_role(&actor, &UserId(req.user_id), role)
        .await?;

    Ok(Json(user_to_response(&updated)))
}

// Helper functions

async fn require_actor(
    state: &AppState,
    actor_id: &str,
) -> Result<checkin_core::UserRecord, ApiError> {
    state
        .users
        .get(&UserId(actor_id.to_string()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", actor_id)))
}
