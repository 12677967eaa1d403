//! Message entity

use checkin_core::{Message, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use super::Entity;

/// Direct message row stored in SurrealDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntity {
    /// Message ID (unique)
    pub message_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub body: String,
    pub sent_at: Datetime,
    pub read_at: Option<Datetime>,
}

impl Entity for MessageEntity {
    const TABLE: &'static str = "message";
}

impl MessageEntity {
    pub fn new(message_id: String, sender_id: String, recipient_id: String, body: String) -> Self {
        Self {
            message_id,
            sender_id,
            recipient_id,
            body,
            sent_at: Utc::now().into(),
            read_at: None,
        }
    }

    pub fn into_message(self) -> Message {
        Message {
            message_id: self.message_id,
            sender_id: UserId(self.sender_id),
            recipient_id: UserId(self.recipient_id),
            body: self.body,
            sent_at: self.sent_at.into(),
            read_at: self.read_at.map(Into::into),
        }
    }
}
