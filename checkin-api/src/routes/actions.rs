//! Check-in and journal endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use checkin_core::{ActionKind, ActionLedger, ActionPayload, ActionRecord, UserId};
use serde::Deserialize;

use crate::dto::{ActionResponse, CheckInRequest, JournalRequest};
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// Submit a check-in
pub async fn submit_checkin(
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> ApiResult<Json<ActionResponse>> {
    let record = state
        .actions
        .record_action(
            &UserId(req.user_id),
            ActionKind::CheckIn,
            ActionPayload {
                mood: Some(req.mood),
                content: req.note,
            },
        )
        .await?;

    Ok(Json(action_to_response(&record)))
}

/// Submit a journal entry
pub async fn submit_journal(
    State(state): State<AppState>,
    Json(req): Json<JournalRequest>,
) -> ApiResult<Json<ActionResponse>> {
    let record = state
        .actions
        .record_action(
            &UserId(req.user_id),
            ActionKind::Journal,
            ActionPayload {
                mood: None,
                content: Some(req.content),
            },
        )
        .await?;

    Ok(Json(action_to_response(&record)))
}

/// Get a user's recent actions, newest first
pub async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<ActionResponse>>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let records = state
        .actions
        .history(&UserId(user_id), limit)
        .await?;

    Ok(Json(records.iter().map(action_to_response).collect()))
}

// Helper functions

pub(crate) fn action_to_response(record: &ActionRecord) -> ActionResponse {
    ActionResponse {
        action_id: record.action_id.clone(),
        user_id: record.user_id.0.clone(),
        kind: record.kind.as_str().to_string(),
        mood: record.mood.clone(),
        content: record.content.clone(),
        action_date: record.action_date.clone(),
        created_at: record.created_at,
    }
}
