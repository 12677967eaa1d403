//! Action ledger service
//!
//! Append-only record of check-ins and journal entries, with per-student
//! daily caps. "Today" is the server-local calendar date: every action is
//! stamped with a "YYYY-MM-DD" date string at insertion and cap counting
//! compares that string by equality, so the day rolls over at local
//! midnight rather than on a 24-hour sliding window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use checkin_core::{
    ActionKind, ActionLedger, ActionPayload, ActionRecord, CheckinError, CheckinResult,
    ClassActionCount, MoodCount, RewardLedger, SettingKey, SettingsProvider, UserId,
};
use chrono::{Local, Utc};
use serde::Deserialize;

use crate::datastore::SurrealDatastore;
use crate::entities::{ActionEntity, Entity};
use crate::error::StoreError;
use crate::services::{RewardService, SettingsService, UserService};
use crate::validation::{normalize_opt, validate_payload};

/// Current server-local calendar date as "YYYY-MM-DD".
pub fn today_local() -> String {
    Local::now().date_naive().to_string()
}

#[derive(Debug, Deserialize)]
struct CountRow {
    cnt: u64,
}

#[derive(Debug, Deserialize)]
struct MoodRow {
    mood: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct ClassRow {
    class_name: String,
    count: u64,
}

/// Action ledger backed by the `action` table.
///
/// The cap check and the insert are two statements, not one serializable
/// transaction: two concurrent requests from the same user can both pass
/// the check and briefly overshoot the cap by one. Accepted given the low
/// per-user request concurrency.
pub struct ActionService {
    datastore: Arc<SurrealDatastore>,
    users: Arc<UserService>,
    settings: Arc<SettingsService>,
    rewards: Arc<RewardService>,
    sequence: AtomicU64,
}

impl ActionService {
    pub fn new(
        datastore: Arc<SurrealDatastore>,
        users: Arc<UserService>,
        settings: Arc<SettingsService>,
        rewards: Arc<RewardService>,
    ) -> Self {
        Self {
            datastore,
            users,
            settings,
            rewards,
            sequence: AtomicU64::new(0),
        }
    }

    /// Generate a new ID
    fn generate_id(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        format!("{}_{:016x}_{:08x}", prefix, timestamp, seq)
    }

    fn toggle_for(kind: ActionKind) -> SettingKey {
        match kind {
            ActionKind::CheckIn => SettingKey::CheckinsEnabled,
            ActionKind::Journal => SettingKey::JournalsEnabled,
        }
    }

    /// User-facing message for a cap rejection, pluralized for caps > 1.
    fn cap_message(kind: ActionKind, cap: u32) -> String {
        if cap == 1 {
            match kind {
                ActionKind::CheckIn => "You've already checked in today.".to_string(),
                ActionKind::Journal => {
                    "You've already written a journal entry today.".to_string()
                }
            }
        } else {
            format!(
                "You've reached the daily limit of {} {}.",
                cap,
                kind.noun_plural()
            )
        }
    }

    async fn count_where(&self, clause: &str, binds: Vec<(&'static str, String)>) -> CheckinResult<u64> {
        let statement = format!(
            "SELECT count() AS cnt FROM {} WHERE {} GROUP ALL",
            ActionEntity::TABLE,
            clause
        );

        let mut query = self.datastore.client().query(statement);
        for (name, value) in binds {
            query = query.bind((name, value));
        }

        let mut response = query
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows: Vec<CountRow> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().next().map(|r| r.cnt).unwrap_or(0))
    }

    /// Mood tallies for check-ins on a calendar date.
    pub async fn mood_breakdown(&self, date: &str) -> CheckinResult<Vec<MoodCount>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT mood, count() AS count FROM {} \
                 WHERE kind = 'check_in' AND action_date = $date AND mood != NONE \
                 GROUP BY mood",
                ActionEntity::TABLE
            ))
            .bind(("date", date.to_string()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows: Vec<MoodRow> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| MoodCount {
                mood: r.mood,
                count: r.count,
            })
            .collect())
    }

    /// Per-class tallies for a kind on a calendar date.
    pub async fn class_breakdown(
        &self,
        kind: ActionKind,
        date: &str,
    ) -> CheckinResult<Vec<ClassActionCount>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT class_name, count() AS count FROM {} \
                 WHERE kind = $kind AND action_date = $date AND class_name != NONE \
                 GROUP BY class_name",
                ActionEntity::TABLE
            ))
            .bind(("kind", kind.as_str()))
            .bind(("date", date.to_string()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows: Vec<ClassRow> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| ClassActionCount {
                class_name: r.class_name,
                count: r.count,
            })
            .collect())
    }
}

#[async_trait]
impl ActionLedger for ActionService {
    async fn record_action(
        &self,
        user_id: &UserId,
        kind: ActionKind,
        payload: ActionPayload,
    ) -> CheckinResult<ActionRecord> {
        validate_payload(kind, &payload)?;

        let user = self.users.require(user_id).await?;

        if !self.settings.flag(Self::toggle_for(kind)).await {
            return Err(CheckinError::Validation(match kind {
                ActionKind::CheckIn => "Check-ins are currently disabled.".to_string(),
                ActionKind::Journal => "Journal entries are currently disabled.".to_string(),
            }));
        }

        let today = today_local();

        // Caps apply to students only; staff usage is never limited.
        if user.role.is_student() {
            let cap = self.settings.cap(kind).await;
            let count = self.count_on(user_id, kind, &today).await?;
            if count >= u64::from(cap) {
                return Err(CheckinError::CapExceeded(Self::cap_message(kind, cap)));
            }
        }

        let entity = ActionEntity::new(
            self.generate_id("act"),
            user_id.0.clone(),
            kind,
            normalize_opt(payload.mood),
            normalize_opt(payload.content),
            user.class_name.clone(),
            today,
        );

        self.datastore
            .client()
            .query(format!(
                "CREATE {} CONTENT $data RETURN NONE",
                ActionEntity::TABLE
            ))
            .bind(("data", entity.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(user_id = %user_id, kind = %kind, "Recorded action");

        let record = entity.into_record()?;

        // Credit happens after the action is durable; a crediting failure
        // is logged inside award and never unwinds the action.
        self.rewards.award(user_id, kind.points()).await;

        Ok(record)
    }

    async fn count_on(
        &self,
        user_id: &UserId,
        kind: ActionKind,
        date: &str,
    ) -> CheckinResult<u64> {
        self.count_where(
            "user_id = $user_id AND kind = $kind AND action_date = $date",
            vec![
                ("user_id", user_id.0.clone()),
                ("kind", kind.as_str().to_string()),
                ("date", date.to_string()),
            ],
        )
        .await
    }

    async fn journal_count(&self, user_id: &UserId) -> CheckinResult<u64> {
        self.count_where(
            "user_id = $user_id AND kind = 'journal'",
            vec![("user_id", user_id.0.clone())],
        )
        .await
    }

    async fn history(&self, user_id: &UserId, limit: u32) -> CheckinResult<Vec<ActionRecord>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE user_id = $user_id \
                 ORDER BY created_at DESC LIMIT $limit",
                ActionEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .bind(("limit", i64::from(limit)))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<ActionEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        entities
            .into_iter()
            .map(|e| e.into_record().map_err(CheckinError::from))
            .collect()
    }
}
