//! Check-in and journal action types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{CHECKIN_POINTS, JOURNAL_POINTS};

/// Kind of a recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CheckIn,
    Journal,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CheckIn => "check_in",
            ActionKind::Journal => "journal",
        }
    }

    /// Parse an action kind from its wire representation.
    pub fn parse(s: &str) -> Option<ActionKind> {
        match s {
            "check_in" => Some(ActionKind::CheckIn),
            "journal" => Some(ActionKind::Journal),
            _ => None,
        }
    }

    /// House points credited when an action of this kind succeeds.
    pub fn points(&self) -> i64 {
        match self {
            ActionKind::CheckIn => CHECKIN_POINTS,
            ActionKind::Journal => JOURNAL_POINTS,
        }
    }

    /// Singular noun for user-facing messages.
    pub fn noun(&self) -> &'static str {
        match self {
            ActionKind::CheckIn => "check-in",
            ActionKind::Journal => "journal entry",
        }
    }

    /// Plural noun for user-facing messages.
    pub fn noun_plural(&self) -> &'static str {
        match self {
            ActionKind::CheckIn => "check-ins",
            ActionKind::Journal => "journal entries",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request-side fields of an action submission.
///
/// A check-in carries a mood (and optionally a note); a journal entry
/// carries its content. Validation of which fields are required for which
/// kind happens in the action ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPayload {
    pub mood: Option<String>,
    pub content: Option<String>,
}

/// A single recorded check-in or journal entry.
///
/// Append-only: never mutated or deleted except by the administrative
/// bulk purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action_id: String,
    pub user_id: super::UserId,
    pub kind: ActionKind,
    pub mood: Option<String>,
    pub content: Option<String>,
    /// Server-local calendar date of submission, "YYYY-MM-DD". Daily caps
    /// compare this field by equality, so "today" rolls over at local
    /// midnight rather than on a 24-hour sliding window.
    pub action_date: String,
    pub created_at: DateTime<Utc>,
}

/// Mood tally for a single day, used by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: u64,
}

/// Per-class check-in tally for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassActionCount {
    pub class_name: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [ActionKind::CheckIn, ActionKind::Journal] {
            assert_eq!(ActionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActionKind::parse("mood"), None);
    }

    #[test]
    fn test_kind_points() {
        assert_eq!(ActionKind::CheckIn.points(), 1);
        assert_eq!(ActionKind::Journal.points(), 2);
    }
}
