//! User account service

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use checkin_core::{CheckinError, CheckinResult, Role, UserId, UserRecord};
use chrono::Utc;

use crate::datastore::SurrealDatastore;
use crate::entities::{Entity, UserEntity};
use crate::error::StoreError;
use crate::validation::{normalize_opt, validate_display_name};

/// Account registration and lookup.
///
/// Authentication (passwords, sessions) is handled by the calling layer;
/// this service only owns the account records themselves.
pub struct UserService {
    datastore: Arc<SurrealDatastore>,
    sequence: AtomicU64,
}

impl UserService {
    pub fn new(datastore: Arc<SurrealDatastore>) -> Self {
        Self {
            datastore,
            sequence: AtomicU64::new(0),
        }
    }

    /// Generate a new ID
    fn generate_id(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        format!("{}_{:016x}_{:08x}", prefix, timestamp, seq)
    }

    /// Register a new account.
    pub async fn register(
        &self,
        display_name: &str,
        role: Role,
        class_name: Option<String>,
        house: Option<String>,
    ) -> CheckinResult<UserRecord> {
        validate_display_name(display_name)?;

        let entity = UserEntity::new(
            self.generate_id("usr"),
            display_name.trim().to_string(),
            role,
            normalize_opt(class_name),
            normalize_opt(house),
        );

        self.datastore
            .client()
            .query(format!(
                "CREATE {} CONTENT $data RETURN NONE",
                UserEntity::TABLE
            ))
            .bind(("data", entity.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(user_id = %entity.user_id, role = %entity.role, "Registered user");

        Ok(entity.into_record()?)
    }

    /// Get a user by ID.
    pub async fn get(&self, user_id: &UserId) -> CheckinResult<Option<UserRecord>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE user_id = $user_id LIMIT 1",
                UserEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<UserEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        entities
            .into_iter()
            .next()
            .map(|e| e.into_record().map_err(CheckinError::from))
            .transpose()
    }

    /// Get a user by ID, failing with `NotFound` if absent.
    pub async fn require(&self, user_id: &UserId) -> CheckinResult<UserRecord> {
        self.get(user_id)
            .await?
            .ok_or_else(|| CheckinError::NotFound(format!("User {}", user_id)))
    }

    /// List every account with the given role.
    pub async fn list_by_role(&self, role: Role) -> CheckinResult<Vec<UserRecord>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE role = $role ORDER BY created_at",
                UserEntity::TABLE
            ))
            .bind(("role", role.as_str()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<UserEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        entities
            .into_iter()
            .map(|e| e.into_record().map_err(CheckinError::from))
            .collect()
    }
}
