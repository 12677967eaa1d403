//! Administrative operations
//!
//! The bulk purge is the one operation needing multi-row atomicity: it
//! runs as a single BEGIN/COMMIT script so a failure at any statement
//! rolls the whole deletion back and leaves every row in place.

use std::sync::Arc;

use checkin_core::{CheckinError, CheckinResult, PurgeSummary, Role, UserId, UserRecord};

use crate::datastore::SurrealDatastore;
use crate::entities::{
    ActionEntity, Entity, HousePointsEntity, MessageEntity, TileCycleEntity, TileFlipEntity,
    UserEntity,
};
use crate::error::StoreError;
use crate::services::UserService;

/// Director-only administration
pub struct AdminService {
    datastore: Arc<SurrealDatastore>,
    users: Arc<UserService>,
}

impl AdminService {
    pub fn new(datastore: Arc<SurrealDatastore>, users: Arc<UserService>) -> Self {
        Self { datastore, users }
    }

    fn require_director(actor: &UserRecord) -> CheckinResult<()> {
        if !actor.role.is_director() {
            return Err(CheckinError::Unauthorized(
                "Only a director can perform this operation.".to_string(),
            ));
        }
        Ok(())
    }

    /// Delete every account with the target role together with all of its
    /// dependent rows, all-or-nothing.
    pub async fn purge_role(
        &self,
        actor: &UserRecord,
        target: Role,
    ) -> CheckinResult<PurgeSummary> {
        Self::require_director(actor)?;

        let targets = self.users.list_by_role(target).await?;
        let user_ids: Vec<String> = targets.into_iter().map(|u| u.user_id.0).collect();
        let users_removed = user_ids.len() as u64;

        if user_ids.is_empty() {
            return Ok(PurgeSummary {
                role: target,
                users_removed: 0,
            });
        }

        let script = format!(
            "BEGIN TRANSACTION;\n\
             DELETE {actions} WHERE user_id IN $user_ids;\n\
             DELETE {points} WHERE user_id IN $user_ids;\n\
             DELETE {flips} WHERE user_id IN $user_ids;\n\
             DELETE {cycles} WHERE user_id IN $user_ids;\n\
             DELETE {messages} WHERE sender_id IN $user_ids OR recipient_id IN $user_ids;\n\
             DELETE {users} WHERE user_id IN $user_ids;\n\
             COMMIT TRANSACTION;",
            actions = ActionEntity::TABLE,
            points = HousePointsEntity::TABLE,
            flips = TileFlipEntity::TABLE,
            cycles = TileCycleEntity::TABLE,
            messages = MessageEntity::TABLE,
            users = UserEntity::TABLE,
        );

        self.datastore
            .client()
            .query(script)
            .bind(("user_ids", user_ids))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(role = %target, users_removed, "Purged role");

        Ok(PurgeSummary {
            role: target,
            users_removed,
        })
    }

    /// Administrative role override. Role is otherwise immutable after
    /// registration.
    pub async fn set_role(
        &self,
        actor: &UserRecord,
        user_id: &UserId,
        role: Role,
    ) -> CheckinResult<UserRecord> {
        Self::require_director(actor)?;

        self.users.require(user_id).await?;

        self.datastore
            .client()
            .query(format!(
                "UPDATE {} SET role = $role WHERE user_id = $user_id RETURN NONE",
                UserEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .bind(("role", role.as_str()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .check()
            .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::info!(user_id = %user_id, role = %role, "Role overridden");

        self.users.require(user_id).await
    }
}
