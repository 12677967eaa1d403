//! House-point endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use checkin_core::{CheckinError, RewardLedger, UserId};

use crate::dto::{AwardPointsRequest, BalanceResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Manually award bonus points to a student (staff only)
pub async fn award_points(
    State(state): State<AppState>,
    Json(req): Json<AwardPointsRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let actor = state
        .users
        .get(&UserId(req.actor_id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", req.actor_id)))?;

    if actor.role.is_student() {
        return Err(CheckinError::Unauthorized(
            "Only staff can award bonus points.".to_string(),
        )
        .into());
    }
    if req.points <= 0 {
        return Err(ApiError::BadRequest(
            "Points must be a positive number.".to_string(),
        ));
    }

    let user_id = UserId(req.user_id.clone());
    state.users.require(&user_id).await?;

    // No-op for staff and houseless students, by design.
    state.rewards.award(&user_id, req.points).await;

    Ok(Json(
        serde_json::json!({ "user_id": req.user_id, "points": req.points }),
    ))
}

/// Get a user's point balance
pub async fn get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<BalanceResponse>> {
    let user_id = UserId(user_id);
    state.users.require(&user_id).await?;

    let balance = state.rewards.balance(&user_id).await?;

    Ok(Json(BalanceResponse {
        user_id: user_id.0,
        house: balance.as_ref().map(|b| b.house.clone()),
        total: balance.as_ref().map(|b| b.total).unwrap_or(0),
    }))
}
