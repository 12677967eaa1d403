//! User entity

use checkin_core::{Role, UserId, UserRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use crate::error::{StoreError, StoreResult};

use super::Entity;

/// Account row stored in SurrealDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    /// User ID (unique)
    pub user_id: String,
    pub display_name: String,
    /// Role: student, teacher, director
    pub role: String,
    pub class_name: Option<String>,
    pub house: Option<String>,
    pub created_at: Datetime,
}

impl Entity for UserEntity {
    const TABLE: &'static str = "app_user";
}

impl UserEntity {
    /// Create a new user entity
    pub fn new(
        user_id: String,
        display_name: String,
        role: Role,
        class_name: Option<String>,
        house: Option<String>,
    ) -> Self {
        Self {
            user_id,
            display_name,
            role: role.as_str().to_string(),
            class_name,
            house,
            created_at: Utc::now().into(),
        }
    }

    /// Convert into the core record, validating the stored role.
    pub fn into_record(self) -> StoreResult<UserRecord> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            StoreError::Query(format!("unexpected role '{}' in app_user row", self.role))
        })?;

        Ok(UserRecord {
            user_id: UserId(self.user_id),
            display_name: self.display_name,
            role,
            class_name: self.class_name,
            house: self.house,
            created_at: self.created_at.into(),
        })
    }
}
