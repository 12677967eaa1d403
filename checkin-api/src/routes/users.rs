//! User management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use checkin_core::{Role, UserId, UserRecord};

use crate::dto::{RegisterUserRequest, UserResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Register a new user
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let role = parse_role(&req.role)?;

    let record = state
        .users
        .register(&req.display_name, role, req.class_name, req.house)
        .await?;

    Ok(Json(user_to_response(&record)))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .get(&UserId(user_id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(user_to_response(&user)))
}

// Helper functions

pub(crate) fn parse_role(s: &str) -> Result<Role, ApiError> {
    Role::parse(s).ok_or_else(|| ApiError::BadRequest(format!("Invalid role: {}", s)))
}

pub(crate) fn user_to_response(record: &UserRecord) -> UserResponse {
    UserResponse {
        user_id: record.user_id.0.clone(),
        display_name: record.display_name.clone(),
        role: record.role.as_str().to_string(),
        class_name: record.class_name.clone(),
        house: record.house.clone(),
        created_at: record.created_at,
    }
}
