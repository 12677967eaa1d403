//! Messaging endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use checkin_core::{Message, UserId};
use serde::Deserialize;

use crate::dto::{MarkReadRequest, MessageResponse, SendMessageRequest};
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_INBOX_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    pub limit: Option<u32>,
}

/// Send a message
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state
        .messages
        .send(
            &UserId(req.sender_id),
            &UserId(req.recipient_id),
            &req.body,
        )
        .await?;

    Ok(Json(message_to_response(&message)))
}

/// Get a user's received messages, newest first
pub async fn get_inbox(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<InboxQuery>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let limit = query.limit.unwrap_or(DEFAULT_INBOX_LIMIT);

    let messages = state.messages.inbox(&UserId(user_id), limit).await?;

    Ok(Json(messages.iter().map(message_to_response).collect()))
}

/// Mark a received message as read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Json(req): Json<MarkReadRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .messages
        .mark_read(&UserId(req.user_id), &message_id)
        .await?;

    Ok(Json(serde_json::json!({ "message_id": message_id, "read": true })))
}

// Helper functions

fn message_to_response(message: &Message) -> MessageResponse {
    MessageResponse {
        message_id: message.message_id.clone(),
        sender_id: message.sender_id.0.clone(),
        recipient_id: message.recipient_id.0.clone(),
        body: message.body.clone(),
        sent_at: message.sent_at,
        read_at: message.read_at,
    }
}
