//! Action entity (check-ins and journal entries)

use checkin_core::{ActionKind, ActionRecord, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use crate::error::{StoreError, StoreResult};

use super::Entity;

/// Append-only action row stored in SurrealDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntity {
    /// Action ID (unique)
    pub action_id: String,
    pub user_id: String,
    /// Kind: check_in, journal
    pub kind: String,
    pub mood: Option<String>,
    pub content: Option<String>,
    /// Class of the acting user at submission time, denormalized so the
    /// dashboard breakdowns stay single-table.
    pub class_name: Option<String>,
    /// Server-local calendar date, "YYYY-MM-DD". Daily caps compare this
    /// by equality.
    pub action_date: String,
    pub created_at: Datetime,
}

impl Entity for ActionEntity {
    const TABLE: &'static str = "action";
}

impl ActionEntity {
    /// Create a new action entity stamped with the given local date.
    pub fn new(
        action_id: String,
        user_id: String,
        kind: ActionKind,
        mood: Option<String>,
        content: Option<String>,
        class_name: Option<String>,
        action_date: String,
    ) -> Self {
        Self {
            action_id,
            user_id,
            kind: kind.as_str().to_string(),
            mood,
            content,
            class_name,
            action_date,
            created_at: Utc::now().into(),
        }
    }

    /// Convert into the core record, validating the stored kind.
    pub fn into_record(self) -> StoreResult<ActionRecord> {
        let kind = ActionKind::parse(&self.kind).ok_or_else(|| {
            StoreError::Query(format!("unexpected kind '{}' in action row", self.kind))
        })?;

        Ok(ActionRecord {
            action_id: self.action_id,
            user_id: UserId(self.user_id),
            kind,
            mood: self.mood,
            content: self.content,
            action_date: self.action_date,
            created_at: self.created_at.into(),
        })
    }
}
