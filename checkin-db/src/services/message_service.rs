//! Messaging service
//!
//! A thin direct-message layer between accounts. No threading, no
//! attachments; just send, list and mark-read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use checkin_core::{CheckinError, CheckinResult, Message, UserId};
use chrono::Utc;
use surrealdb::sql::Datetime;

use crate::datastore::SurrealDatastore;
use crate::entities::{Entity, MessageEntity};
use crate::error::StoreError;
use crate::services::UserService;
use crate::validation::validate_message_body;

/// Message table access
pub struct MessageService {
    datastore: Arc<SurrealDatastore>,
    users: Arc<UserService>,
    sequence: AtomicU64,
}

impl MessageService {
    pub fn new(datastore: Arc<SurrealDatastore>, users: Arc<UserService>) -> Self {
        Self {
            datastore,
            users,
            sequence: AtomicU64::new(0),
        }
    }

    /// Generate a new ID
    fn generate_id(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        format!("{}_{:016x}_{:08x}", prefix, timestamp, seq)
    }

    /// Send a message from one account to another.
    pub async fn send(
        &self,
        sender_id: &UserId,
        recipient_id: &UserId,
        body: &str,
    ) -> CheckinResult<Message> {
        validate_message_body(body)?;
        self.users.require(sender_id).await?;
        self.users.require(recipient_id).await?;

        let entity = MessageEntity::new(
            self.generate_id("msg"),
            sender_id.0.clone(),
            recipient_id.0.clone(),
            body.trim().to_string(),
        );

        self.datastore
            .client()
            .query(format!(
                "CREATE {} CONTENT $data RETURN NONE",
                MessageEntity::TABLE
            ))
            .bind(("data", entity.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(
            sender = %sender_id,
            recipient = %recipient_id,
            "Message sent"
        );

        Ok(entity.into_message())
    }

    /// A user's received messages, newest first.
    pub async fn inbox(&self, user_id: &UserId, limit: u32) -> CheckinResult<Vec<Message>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE recipient_id = $user_id \
                 ORDER BY sent_at DESC LIMIT $limit",
                MessageEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .bind(("limit", i64::from(limit)))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<MessageEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(entities
            .into_iter()
            .map(MessageEntity::into_message)
            .collect())
    }

    /// Mark one of the recipient's messages as read.
    pub async fn mark_read(&self, user_id: &UserId, message_id: &str) -> CheckinResult<()> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "UPDATE {} SET read_at = $now \
                 WHERE message_id = $message_id AND recipient_id = $user_id \
                 RETURN VALUE message_id",
                MessageEntity::TABLE
            ))
            .bind(("message_id", message_id.to_string()))
            .bind(("user_id", user_id.0.clone()))
            .bind(("now", Datetime::from(Utc::now())))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let updated: Vec<String> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if updated.is_empty() {
            return Err(CheckinError::NotFound(format!("Message {}", message_id)));
        }

        Ok(())
    }
}
