//! Setting entity

use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use super::Entity;

/// Key-value setting row stored in SurrealDB.
///
/// The value is either a boolean (feature toggle) or an integer (daily
/// cap); interpretation and defaulting live in the settings service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingEntity {
    /// Setting key (unique)
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: Datetime,
    /// User ID of the director who last changed this value.
    pub updated_by: Option<String>,
}

impl Entity for SettingEntity {
    const TABLE: &'static str = "setting";
}

impl SettingEntity {
    /// Create a new setting entity
    pub fn new(key: String, value: serde_json::Value, updated_by: Option<String>) -> Self {
        Self {
            key,
            value,
            updated_at: Utc::now().into(),
            updated_by,
        }
    }
}
