//! User identity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID - primary identifier for every account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role.
///
/// Only students are subject to daily caps and house-point accrual;
/// teachers and directors are staff. Role is immutable after registration
/// except through the director-only administrative override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Director,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Director => "director",
        }
    }

    /// Parse a role from its wire representation.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "director" => Some(Role::Director),
            _ => None,
        }
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Role::Student)
    }

    pub fn is_director(&self) -> bool {
        matches!(self, Role::Director)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub role: Role,
    /// Class/grade label, e.g. "7B". Absent for most staff accounts.
    pub class_name: Option<String>,
    /// House affiliation used for point aggregation. Absent for staff.
    pub house: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of an administrative bulk purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeSummary {
    /// Role whose accounts were purged.
    pub role: Role,
    /// Number of user rows removed, dependents cascaded.
    pub users_removed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Student, Role::Teacher, Role::Director] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_only_directors_are_directors() {
        assert!(Role::Director.is_director());
        assert!(!Role::Teacher.is_director());
        assert!(Role::Student.is_student());
        assert!(!Role::Director.is_student());
    }
}
