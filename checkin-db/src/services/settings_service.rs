//! Settings store service
//!
//! Global feature toggles and daily caps. Reads are fail-open: missing
//! keys, malformed values and storage errors all fall back to the
//! documented defaults so a settings outage never blocks a check-in.
//! Writes are director-only.

use std::sync::Arc;

use async_trait::async_trait;
use checkin_core::{
    ActionKind, CheckinError, CheckinResult, SettingEntry, SettingKey, SettingValue,
    SettingsProvider, UserRecord,
};
use chrono::Utc;
use surrealdb::sql::Datetime;

use crate::datastore::SurrealDatastore;
use crate::entities::{Entity, SettingEntity};
use crate::error::{StoreError, StoreResult};
use crate::validation::validate_cap;

/// Fail-open settings store backed by the `setting` table.
pub struct SettingsService {
    datastore: Arc<SurrealDatastore>,
}

impl SettingsService {
    pub fn new(datastore: Arc<SurrealDatastore>) -> Self {
        Self { datastore }
    }

    async fn read(&self, key: SettingKey) -> StoreResult<Option<SettingEntity>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE key = $key LIMIT 1",
                SettingEntity::TABLE
            ))
            .bind(("key", key.as_str()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<SettingEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(entities.into_iter().next())
    }

    /// Interpret a stored value against the key's expected shape.
    fn coerce(key: SettingKey, raw: &serde_json::Value) -> Option<SettingValue> {
        if key.is_flag() {
            raw.as_bool().map(SettingValue::Flag)
        } else {
            raw.as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(SettingValue::Number)
        }
    }

    /// Effective value for a key, defaulting on any failure.
    pub async fn value(&self, key: SettingKey) -> SettingValue {
        match self.read(key).await {
            Ok(Some(entity)) => {
                Self::coerce(key, &entity.value).unwrap_or_else(|| key.default_value())
            }
            Ok(None) => key.default_value(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Settings read failed, using default");
                key.default_value()
            }
        }
    }
}

#[async_trait]
impl SettingsProvider for SettingsService {
    async fn flag(&self, key: SettingKey) -> bool {
        self.value(key)
            .await
            .as_flag()
            .unwrap_or_else(|| key.default_value().as_flag().unwrap_or(true))
    }

    async fn cap(&self, kind: ActionKind) -> u32 {
        let key = SettingKey::cap_for(kind);
        self.value(key)
            .await
            .as_number()
            .unwrap_or(checkin_core::DEFAULT_DAILY_CAP)
    }

    async fn snapshot(&self) -> Vec<SettingEntry> {
        let mut entries = Vec::with_capacity(SettingKey::ALL.len());
        for key in SettingKey::ALL {
            entries.push(SettingEntry {
                key,
                value: self.value(key).await,
            });
        }
        entries
    }

    async fn set(
        &self,
        actor: &UserRecord,
        key: SettingKey,
        value: SettingValue,
    ) -> CheckinResult<SettingEntry> {
        if !actor.role.is_director() {
            return Err(CheckinError::Unauthorized(
                "Only a director can change settings.".to_string(),
            ));
        }

        let value = match (key.is_flag(), value) {
            (true, SettingValue::Flag(v)) => SettingValue::Flag(v),
            (false, SettingValue::Number(v)) => SettingValue::Number(validate_cap(v)?),
            (true, SettingValue::Number(_)) => {
                return Err(CheckinError::Validation(format!(
                    "Setting '{}' expects true or false.",
                    key
                )))
            }
            (false, SettingValue::Flag(_)) => {
                return Err(CheckinError::Validation(format!(
                    "Setting '{}' expects a number.",
                    key
                )))
            }
        };

        let raw = serde_json::to_value(value).map_err(StoreError::from)?;
        let existing = self.read(key).await?;

        if existing.is_some() {
            self.datastore
                .client()
                .query(format!(
                    "UPDATE {} SET value = $value, updated_at = $now, updated_by = $by \
                     WHERE key = $key RETURN NONE",
                    SettingEntity::TABLE
                ))
                .bind(("key", key.as_str()))
                .bind(("value", raw))
                .bind(("now", Datetime::from(Utc::now())))
                .bind(("by", actor.user_id.0.clone()))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        } else {
            let entity = SettingEntity::new(
                key.as_str().to_string(),
                raw,
                Some(actor.user_id.0.clone()),
            );
            self.datastore
                .client()
                .query(format!(
                    "CREATE {} CONTENT $data RETURN NONE",
                    SettingEntity::TABLE
                ))
                .bind(("data", entity))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        }

        tracing::info!(key = %key, "Setting updated");

        Ok(SettingEntry { key, value })
    }
}
