//! Reward accumulator service
//!
//! Credits house points for qualifying actions. Awards never fail the
//! caller: the check-in, journal entry or tile flip that earned the
//! points has already happened, so a crediting failure is logged and
//! swallowed rather than surfaced.

use std::sync::Arc;

use async_trait::async_trait;
use checkin_core::{CheckinResult, ClassTotal, HousePoints, HouseTotal, RewardLedger, UserId};
use chrono::Utc;
use serde::Deserialize;
use surrealdb::sql::Datetime;

use crate::datastore::SurrealDatastore;
use crate::entities::{Entity, HousePointsEntity};
use crate::error::StoreError;
use crate::services::UserService;

#[derive(Debug, Deserialize)]
struct HouseRow {
    house: String,
    points: i64,
}

#[derive(Debug, Deserialize)]
struct ClassRow {
    class_name: String,
    points: i64,
}

/// House-point ledger backed by the `house_points` table, one row per
/// user, created lazily on the first qualifying award.
pub struct RewardService {
    datastore: Arc<SurrealDatastore>,
    users: Arc<UserService>,
}

impl RewardService {
    pub fn new(datastore: Arc<SurrealDatastore>, users: Arc<UserService>) -> Self {
        Self { datastore, users }
    }

    async fn fetch_entity(&self, user_id: &UserId) -> CheckinResult<Option<HousePointsEntity>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT * OMIT id FROM {} WHERE user_id = $user_id LIMIT 1",
                HousePointsEntity::TABLE
            ))
            .bind(("user_id", user_id.0.clone()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let entities: Vec<HousePointsEntity> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(entities.into_iter().next())
    }

    /// The fallible path behind `award`. Rewards apply only to
    /// house-affiliated students; everyone else is a silent no-op.
    async fn credit(&self, user_id: &UserId, points: i64) -> CheckinResult<()> {
        let Some(user) = self.users.get(user_id).await? else {
            return Ok(());
        };
        if !user.role.is_student() {
            return Ok(());
        }
        let Some(house) = user.house else {
            return Ok(());
        };

        if self.fetch_entity(user_id).await?.is_some() {
            // Single-statement increment: the row update is atomic at the
            // storage level.
            self.datastore
                .client()
                .query(format!(
                    "UPDATE {} SET total += $points, updated_at = $now \
                     WHERE user_id = $user_id RETURN NONE",
                    HousePointsEntity::TABLE
                ))
                .bind(("user_id", user_id.0.clone()))
                .bind(("points", points))
                .bind(("now", Datetime::from(Utc::now())))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        } else {
            let entity =
                HousePointsEntity::new(user_id.0.clone(), house, user.class_name, points);
            self.datastore
                .client()
                .query(format!(
                    "CREATE {} CONTENT $data RETURN NONE",
                    HousePointsEntity::TABLE
                ))
                .bind(("data", entity))
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .check()
                .map_err(|e| StoreError::Query(e.to_string()))?;
        }

        tracing::debug!(user_id = %user_id, points, "Credited house points");

        Ok(())
    }
}

#[async_trait]
impl RewardLedger for RewardService {
    async fn award(&self, user_id: &UserId, points: i64) {
        if let Err(e) = self.credit(user_id, points).await {
            tracing::warn!(
                user_id = %user_id,
                points,
                error = %e,
                "Reward credit failed; primary action is unaffected"
            );
        }
    }

    async fn balance(&self, user_id: &UserId) -> CheckinResult<Option<HousePoints>> {
        Ok(self
            .fetch_entity(user_id)
            .await?
            .map(HousePointsEntity::into_record))
    }

    async fn totals_by_house(&self) -> CheckinResult<Vec<HouseTotal>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT house, math::sum(total) AS points FROM {} GROUP BY house",
                HousePointsEntity::TABLE
            ))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows: Vec<HouseRow> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut totals: Vec<HouseTotal> = rows
            .into_iter()
            .map(|r| HouseTotal {
                house: r.house,
                points: r.points,
            })
            .collect();
        totals.sort_by(|a, b| b.points.cmp(&a.points));

        Ok(totals)
    }

    async fn totals_by_class(&self) -> CheckinResult<Vec<ClassTotal>> {
        let mut response = self
            .datastore
            .client()
            .query(format!(
                "SELECT class_name, math::sum(total) AS points FROM {} \
                 WHERE class_name != NONE GROUP BY class_name",
                HousePointsEntity::TABLE
            ))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows: Vec<ClassRow> = response
            .take(0)
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut totals: Vec<ClassTotal> = rows
            .into_iter()
            .map(|r| ClassTotal {
                class_name: r.class_name,
                points: r.points,
            })
            .collect();
        totals.sort_by(|a, b| b.points.cmp(&a.points));

        Ok(totals)
    }
}
