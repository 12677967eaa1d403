//! House-point ledger types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user's cumulative house-point balance.
///
/// One row per user, created lazily on the first qualifying action.
/// The total is monotonically non-decreasing: no spend or debit operation
/// exists anywhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousePoints {
    pub user_id: UserId,
    pub house: String,
    pub class_name: Option<String>,
    pub total: i64,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated points for one house.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseTotal {
    pub house: String,
    pub points: i64,
}

/// Aggregated points for one class/grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTotal {
    pub class_name: String,
    pub points: i64,
}
