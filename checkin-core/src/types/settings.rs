//! Settings keys and values
//!
//! Settings are global key-value flags persisted in the store: feature
//! toggles and the per-kind daily caps. Reads are fail-open: a missing key
//! or a storage error yields the documented default so a settings outage
//! never blocks check-in functionality.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DAILY_CAP;
use crate::types::ActionKind;

/// Known setting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    /// Toggle for the check-in feature.
    CheckinsEnabled,
    /// Toggle for the journal feature.
    JournalsEnabled,
    /// Toggle for the quote-tile board.
    QuoteBoardEnabled,
    /// Daily check-in cap for students.
    MaxCheckinsPerDay,
    /// Daily journal-entry cap for students.
    MaxJournalEntriesPerDay,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::CheckinsEnabled,
        SettingKey::JournalsEnabled,
        SettingKey::QuoteBoardEnabled,
        SettingKey::MaxCheckinsPerDay,
        SettingKey::MaxJournalEntriesPerDay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::CheckinsEnabled => "checkins_enabled",
            SettingKey::JournalsEnabled => "journals_enabled",
            SettingKey::QuoteBoardEnabled => "quote_board_enabled",
            SettingKey::MaxCheckinsPerDay => "max_checkins_per_day",
            SettingKey::MaxJournalEntriesPerDay => "max_journal_entries_per_day",
        }
    }

    /// Parse a setting key from its wire representation.
    pub fn parse(s: &str) -> Option<SettingKey> {
        match s {
            "checkins_enabled" => Some(SettingKey::CheckinsEnabled),
            "journals_enabled" => Some(SettingKey::JournalsEnabled),
            "quote_board_enabled" => Some(SettingKey::QuoteBoardEnabled),
            "max_checkins_per_day" => Some(SettingKey::MaxCheckinsPerDay),
            "max_journal_entries_per_day" => Some(SettingKey::MaxJournalEntriesPerDay),
            _ => None,
        }
    }

    /// Whether this key holds a boolean toggle (as opposed to a cap).
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            SettingKey::CheckinsEnabled
                | SettingKey::JournalsEnabled
                | SettingKey::QuoteBoardEnabled
        )
    }

    /// The documented fail-open default for this key.
    pub fn default_value(&self) -> SettingValue {
        if self.is_flag() {
            SettingValue::Flag(true)
        } else {
            SettingValue::Number(DEFAULT_DAILY_CAP)
        }
    }

    /// The cap key governing a given action kind.
    pub fn cap_for(kind: ActionKind) -> SettingKey {
        match kind {
            ActionKind::CheckIn => SettingKey::MaxCheckinsPerDay,
            ActionKind::Journal => SettingKey::MaxJournalEntriesPerDay,
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A setting value: either a feature toggle or a numeric cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(u32),
}

impl SettingValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(v) => Some(*v),
            SettingValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            SettingValue::Number(v) => Some(*v),
            SettingValue::Flag(_) => None,
        }
    }
}

/// One key with its effective value, as returned by a settings snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: SettingKey,
    pub value: SettingValue,
}
