//! Settings endpoints

use axum::{extract::State, Json};
use checkin_core::{SettingEntry, SettingKey, SettingsProvider, UserId};

use crate::dto::{SettingsResponse, UpdateSettingRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Get the effective value of every setting
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<SettingsResponse>> {
    let settings = state.settings.snapshot().await;

    Ok(Json(SettingsResponse { settings }))
}

/// Update one setting (director-only)
pub async fn update_setting(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingRequest>,
) -> ApiResult<Json<SettingEntry>> {
    let key = SettingKey::parse(&req.key)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown setting key: {}", req.key)))?;

    let actor = state
        .users
        .get(&UserId(req.actor_id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", req.actor_id)))?;

    let entry = state.settings.set(&actor, key, req.value).await?;

    Ok(Json(entry))
}
