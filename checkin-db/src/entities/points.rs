//! House points entity

use checkin_core::{HousePoints, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use super::Entity;

/// Cumulative house-point balance, one row per user.
///
/// House and class are denormalized from the user row at award time so the
/// dashboard aggregations are single-table GROUP BYs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousePointsEntity {
    /// User ID (unique)
    pub user_id: String,
    pub house: String,
    pub class_name: Option<String>,
    pub total: i64,
    pub updated_at: Datetime,
}

impl Entity for HousePointsEntity {
    const TABLE: &'static str = "house_points";
}

impl HousePointsEntity {
    /// Create a fresh balance row holding the first award.
    pub fn new(user_id: String, house: String, class_name: Option<String>, points: i64) -> Self {
        Self {
            user_id,
            house,
            class_name,
            total: points,
            updated_at: Utc::now().into(),
        }
    }

    /// Credit points to this balance. Totals only ever grow.
    pub fn add(&mut self, points: i64) {
        self.total += points;
        self.updated_at = Utc::now().into();
    }

    pub fn into_record(self) -> HousePoints {
        HousePoints {
            user_id: UserId(self.user_id),
            house: self.house,
            class_name: self.class_name,
            total: self.total,
            updated_at: self.updated_at.into(),
        }
    }
}
